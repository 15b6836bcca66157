use std::collections::BTreeSet;

use database_layer::Row;
use error_common::codes::validation;
use tracing::{debug, info};
use uuid::Uuid;

use super::{search_records, CatalogContext};
use crate::error::{reject, reject_conflict, require_text, CatalogResult};
use crate::models::{Department, DepartmentSource, HospitalBed, DEPARTMENT_CODE_MAX_LEN};

#[derive(Clone)]
pub struct DepartmentService {
    ctx: CatalogContext,
}

impl DepartmentService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    /// Blank form for a new BHYT department
    pub fn default_bhyt_department() -> Department {
        Department {
            department_source: DepartmentSource::Bhyt,
            patient_department: true,
            ..Department::new("")
        }
    }

    /// Set the BHYT name; on a BHYT department the name follows it
    pub fn apply_bhyt_name(department: &mut Department, bhyt_name: &str) {
        department.bhyt_name = Some(bhyt_name.to_string());
        if department.is_bhyt() && !bhyt_name.is_empty() {
            department.name = bhyt_name.to_string();
        }
    }

    /// Create a department
    ///
    /// A BHYT department is always a patient department and gets its BHYT name
    /// from its name (or the other way round when the name is blank).
    pub async fn create(&self, department: Department) -> CatalogResult<Department> {
        self.insert(department)
            .await
            .inspect_err(|err| err.log("department.create"))
    }

    pub async fn update(&self, department: Department) -> CatalogResult<Department> {
        self.replace(department)
            .await
            .inspect_err(|err| err.log("department.update"))
    }

    /// Delete a department together with its mapping links; beds lose the reference
    pub async fn delete(&self, id: Uuid) -> CatalogResult<Department> {
        let removed = self.ctx.departments.delete(id).await?;

        let mapped = self
            .ctx
            .departments
            .find(&move |other: &Department| other.his_department_ids.contains(&id))
            .await?;
        for mut other in mapped {
            other.his_department_ids.remove(&id);
            self.ctx.departments.update(other).await?;
        }

        let beds = self
            .ctx
            .beds
            .find(&move |bed: &HospitalBed| bed.department_id == Some(id))
            .await?;
        for mut bed in beds {
            bed.department_id = None;
            self.ctx.beds.update(bed).await?;
        }

        info!(id = %id, name = %removed.name, "Department deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<Department>> {
        Ok(self.ctx.departments.get(id).await?)
    }

    pub async fn list(&self) -> CatalogResult<Vec<Department>> {
        let mut departments = self.ctx.departments.list().await?;
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    pub async fn list_by_source(&self, source: DepartmentSource) -> CatalogResult<Vec<Department>> {
        let mut departments = self.list().await?;
        departments.retain(|department| department.department_source == source);
        Ok(departments)
    }

    /// Departments matching `term` on either code or either name
    pub async fn search(&self, term: &str) -> CatalogResult<Vec<Department>> {
        let found = search_records(self.list().await?, term, self.ctx.search_limit);
        debug!(term, count = found.len(), "Searched departments");
        Ok(found)
    }

    /// Replace the HIS departments mapped to a BHYT department
    pub async fn set_mappings(
        &self,
        bhyt_department_id: Uuid,
        his_department_ids: impl IntoIterator<Item = Uuid>,
    ) -> CatalogResult<Department> {
        let mut department = self.ctx.departments.require(bhyt_department_id).await?;
        department.his_department_ids = his_department_ids.into_iter().collect();
        self.update(department).await
    }

    /// HIS departments mapped to `id`
    pub async fn mapped_his_departments(&self, id: Uuid) -> CatalogResult<Vec<Department>> {
        let department = self.ctx.departments.require(id).await?;
        let ids = department.his_department_ids;
        let mut mapped = self
            .ctx
            .departments
            .find(&move |other: &Department| ids.contains(&other.id))
            .await?;
        mapped.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(mapped)
    }

    /// BHYT departments that list `his_department_id` among their mappings
    pub async fn bhyt_departments_for(&self, his_department_id: Uuid) -> CatalogResult<Vec<Department>> {
        let mut mapped = self
            .ctx
            .departments
            .find(&move |other: &Department| other.his_department_ids.contains(&his_department_id))
            .await?;
        mapped.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(mapped)
    }

    pub async fn mapping_count(&self, id: Uuid) -> CatalogResult<usize> {
        Ok(self.ctx.departments.require(id).await?.mapping_count())
    }

    async fn insert(&self, mut department: Department) -> CatalogResult<Department> {
        if department.is_bhyt() {
            self.prepare_bhyt(&mut department).await?;
        }
        self.validate(&department).await?;
        let created = self.ctx.departments.insert(department).await?;
        info!(
            id = %created.id,
            source = ?created.department_source,
            mappings = created.mapping_count(),
            "Department created"
        );
        Ok(created)
    }

    async fn replace(&self, department: Department) -> CatalogResult<Department> {
        self.validate(&department).await?;
        let updated = self.ctx.departments.update(department).await?;
        info!(id = %updated.id, mappings = updated.mapping_count(), "Department updated");
        Ok(updated)
    }

    async fn prepare_bhyt(&self, department: &mut Department) -> CatalogResult<()> {
        if let Some(code) = department.bhyt_code.clone().filter(|code| !code.is_empty()) {
            let id = department.id;
            let lookup = code.clone();
            let existing = self
                .ctx
                .departments
                .find(&move |other: &Department| {
                    other.id != id && other.is_bhyt() && other.bhyt_code.as_deref() == Some(lookup.as_str())
                })
                .await?;
            if let Some(existing) = existing.first() {
                return Err(reject_conflict(
                    validation::DUPLICATE_CODE,
                    Department::TABLE,
                    format!("BHYT department code '{code}' already exists!"),
                    code.clone(),
                )
                .with_record(existing.id));
            }
        }

        department.patient_department = true;
        let label = if department.name.trim().is_empty() {
            department.bhyt_name.clone().unwrap_or_default()
        } else {
            department.name.clone()
        };
        department.name = label.clone();
        department.bhyt_name = Some(label);
        Ok(())
    }

    async fn validate(&self, department: &Department) -> CatalogResult<()> {
        require_text(Department::TABLE, "name", &department.name, "Name")?;

        for (code, label) in [
            (&department.bhyt_code, "BHYT Code"),
            (&department.his_code, "HIS Code"),
        ] {
            if code.as_ref().is_some_and(|code| code.chars().count() > DEPARTMENT_CODE_MAX_LEN) {
                return Err(reject(
                    validation::INVALID_FORMAT,
                    Department::TABLE,
                    format!("{label} must not exceed {DEPARTMENT_CODE_MAX_LEN} characters!"),
                ));
            }
        }

        if department.his_department_ids.contains(&department.id) {
            return Err(reject(
                validation::INVALID_REFERENCE,
                Department::TABLE,
                "A department cannot be mapped to itself!",
            ));
        }
        let wanted: BTreeSet<Uuid> = department.his_department_ids.clone();
        if !wanted.is_empty() {
            let lookup = wanted.clone();
            let found = self
                .ctx
                .departments
                .find(&move |other: &Department| lookup.contains(&other.id))
                .await?;
            if found.len() != wanted.len() {
                return Err(reject(
                    validation::INVALID_REFERENCE,
                    Department::TABLE,
                    "Mapped HIS department does not exist!",
                ));
            }
        }
        Ok(())
    }
}
