use database_layer::Row;
use error_common::codes::validation;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::Notification;
use crate::error::{reject, reject_conflict, require_text, CatalogError, CatalogResult};
use crate::models::{Department, DEPARTMENT_CODE_MAX_LEN};
use crate::services::DepartmentService;

/// Form for creating a BHYT department and mapping it to HIS departments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentWizard {
    pub bhyt_code: String,
    pub bhyt_name: String,
    #[serde(default)]
    pub his_department_ids: Vec<Uuid>,
    pub description: Option<String>,
}

/// What the wizard produced; `department` is set only on success
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardOutcome {
    pub notification: Notification,
    pub department: Option<Department>,
}

impl DepartmentWizard {
    pub fn new(bhyt_code: impl Into<String>, bhyt_name: impl Into<String>) -> Self {
        Self {
            bhyt_code: bhyt_code.into(),
            bhyt_name: bhyt_name.into(),
            ..Self::default()
        }
    }

    pub fn with_his_departments(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.his_department_ids = ids.into_iter().collect();
        self
    }

    pub async fn validate(&self, departments: &DepartmentService) -> CatalogResult<()> {
        require_text(Department::TABLE, "bhyt_code", &self.bhyt_code, "BHYT department code")?;
        require_text(Department::TABLE, "bhyt_name", &self.bhyt_name, "BHYT department name")?;
        if self.bhyt_code.chars().count() > DEPARTMENT_CODE_MAX_LEN {
            return Err(reject(
                validation::INVALID_FORMAT,
                Department::TABLE,
                format!("BHYT Code must not exceed {DEPARTMENT_CODE_MAX_LEN} characters!"),
            ));
        }

        let existing = departments
            .list()
            .await?
            .into_iter()
            .find(|department| {
                department.is_bhyt() && department.bhyt_code.as_deref() == Some(self.bhyt_code.as_str())
            });
        if let Some(existing) = existing {
            return Err(reject_conflict(
                validation::DUPLICATE_CODE,
                Department::TABLE,
                format!(
                    "BHYT department code '{}' already exists!\nPlease use a different code.",
                    self.bhyt_code
                ),
                self.bhyt_code.clone(),
            )
            .with_record(existing.id));
        }
        Ok(())
    }

    /// Create the department and describe the result
    pub async fn create_department(
        &self,
        departments: &DepartmentService,
    ) -> CatalogResult<(Department, Notification)> {
        self.validate(departments).await?;

        let department = Department::bhyt(self.bhyt_code.clone(), self.bhyt_name.clone())
            .with_his_departments(self.his_department_ids.iter().copied());
        let created = departments.create(department).await?;

        let mut message = format!("Created BHYT department [{}] {}", self.bhyt_code, self.bhyt_name);
        if !self.his_department_ids.is_empty() {
            let names: Vec<String> = departments
                .mapped_his_departments(created.id)
                .await?
                .into_iter()
                .map(|department| department.name)
                .collect();
            message.push_str(&format!(
                "\nMapped to {} HIS departments: {}",
                names.len(),
                names.join(", ")
            ));
        }
        info!(id = %created.id, bhyt_code = %self.bhyt_code, "BHYT department created from wizard");
        Ok((created, Notification::success("Created successfully", message)))
    }

    /// Run the wizard; failures become a danger notification instead of an error
    pub async fn run(&self, departments: &DepartmentService) -> WizardOutcome {
        match self.create_department(departments).await {
            Ok((department, notification)) => WizardOutcome {
                notification,
                department: Some(department),
            },
            Err(err) => {
                err.log("department_wizard.run");
                WizardOutcome {
                    notification: failure_notification(&err),
                    department: None,
                }
            }
        }
    }
}

fn failure_notification(err: &CatalogError) -> Notification {
    Notification::danger("Department was not created", err.to_string()).sticky()
}
