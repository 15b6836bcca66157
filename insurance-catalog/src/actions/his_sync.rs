//! Demo synchronisation of HIS departments
//!
//! The HIS is reached through [`HisDepartmentSource`]. Only a demo source
//! serving a configured list exists; departments are upserted by HIS code.

use async_trait::async_trait;
use config_engine::{HisDepartmentEntry, HisSyncConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::Notification;
use crate::error::CatalogResult;
use crate::models::{Department, DepartmentSource};
use crate::services::DepartmentService;

#[async_trait]
pub trait HisDepartmentSource: Send + Sync {
    async fn fetch_departments(&self) -> CatalogResult<Vec<HisDepartmentEntry>>;
}

/// Serves a fixed department list
#[derive(Debug, Clone, Default)]
pub struct DemoHisSource {
    entries: Vec<HisDepartmentEntry>,
}

impl DemoHisSource {
    pub fn new(entries: Vec<HisDepartmentEntry>) -> Self {
        Self { entries }
    }

    pub fn from_config(config: &HisSyncConfig) -> Self {
        Self::new(config.departments.clone())
    }
}

#[async_trait]
impl HisDepartmentSource for DemoHisSource {
    async fn fetch_departments(&self) -> CatalogResult<Vec<HisDepartmentEntry>> {
        Ok(self.entries.clone())
    }
}

/// A HIS department the sync could not write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub his_code: String,
    pub message: String,
}

/// Outcome of one sync run
///
/// Entries rejected by validation are listed in `failed`; the other entries
/// are still applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: Vec<SyncFailure>,
}

impl SyncSummary {
    pub fn notification(&self) -> Notification {
        let mut message = format!(
            "Created {} and updated {} HIS departments ({} unchanged).",
            self.created, self.updated, self.unchanged
        );
        if !self.failed.is_empty() {
            let failures: Vec<String> = self
                .failed
                .iter()
                .map(|failure| format!("{}: {}", failure.his_code, failure.message))
                .collect();
            message.push_str(&format!(
                "\n{} HIS departments were skipped:\n{}",
                self.failed.len(),
                failures.join("\n")
            ));
            return Notification::warning("HIS departments partially synchronised", message).sticky();
        }
        if self.created + self.updated == 0 {
            Notification::info("HIS departments are up to date", message)
        } else {
            Notification::success("HIS departments synchronised", message)
        }
    }
}

enum SyncOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Create missing HIS departments and rename existing ones by HIS code
///
/// A validation rejection skips its entry and is reported in the summary.
/// Storage failures abort the run; entries written before stay applied.
pub async fn sync_departments(
    departments: &DepartmentService,
    source: &dyn HisDepartmentSource,
) -> CatalogResult<SyncSummary> {
    let entries = source.fetch_departments().await?;
    let existing = departments.list_by_source(DepartmentSource::His).await?;
    let mut summary = SyncSummary::default();

    for entry in entries {
        let current = existing
            .iter()
            .find(|department| department.his_code.as_deref() == Some(entry.his_code.as_str()));
        match upsert(departments, &entry, current).await {
            Ok(SyncOutcome::Created) => summary.created += 1,
            Ok(SyncOutcome::Updated) => summary.updated += 1,
            Ok(SyncOutcome::Unchanged) => summary.unchanged += 1,
            Err(err) if err.is_validation() => {
                warn!(his_code = %entry.his_code, error = %err, "HIS department skipped");
                summary.failed.push(SyncFailure {
                    his_code: entry.his_code.clone(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        created = summary.created,
        updated = summary.updated,
        unchanged = summary.unchanged,
        failed = summary.failed.len(),
        "HIS department sync finished"
    );
    Ok(summary)
}

async fn upsert(
    departments: &DepartmentService,
    entry: &HisDepartmentEntry,
    current: Option<&Department>,
) -> CatalogResult<SyncOutcome> {
    match current {
        None => {
            departments.create(Department::his(entry.his_code.clone(), entry.name.clone())).await?;
            Ok(SyncOutcome::Created)
        }
        Some(department) if department.name != entry.name => {
            let mut renamed = department.clone();
            renamed.name = entry.name.clone();
            departments.update(renamed).await?;
            Ok(SyncOutcome::Updated)
        }
        Some(_) => {
            debug!(his_code = %entry.his_code, "HIS department unchanged");
            Ok(SyncOutcome::Unchanged)
        }
    }
}
