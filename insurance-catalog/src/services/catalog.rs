use std::sync::Arc;

use config_engine::{CatalogConfig, HisSyncConfig};
use tracing::info;

use super::{
    BenefitCodeService, CatalogContext, CategoryService, DepartmentService, FacilityService,
    HospitalBedService, MedicalStaffService, PaymentRateService, ReferenceLevelService,
};
use crate::actions::{sync_departments, DemoHisSource, Notification};
use crate::clock::{Clock, SystemClock};
use crate::error::CatalogResult;

/// Entry point bundling one service per catalog table
///
/// All services share the same [`CatalogContext`], so references between
/// tables resolve against the same storage.
#[derive(Clone)]
pub struct InsuranceCatalog {
    pub context: CatalogContext,
    pub benefit_codes: BenefitCodeService,
    pub categories: CategoryService,
    pub departments: DepartmentService,
    pub staff: MedicalStaffService,
    pub beds: HospitalBedService,
    pub facilities: FacilityService,
    pub payment_rates: PaymentRateService,
    pub reference_levels: ReferenceLevelService,
    /// HIS departments offered by the demo synchronisation
    pub his_sync: HisSyncConfig,
}

impl InsuranceCatalog {
    pub fn new(context: CatalogContext, his_sync: HisSyncConfig) -> Self {
        Self {
            benefit_codes: BenefitCodeService::new(context.clone()),
            categories: CategoryService::new(context.clone()),
            departments: DepartmentService::new(context.clone()),
            staff: MedicalStaffService::new(context.clone()),
            beds: HospitalBedService::new(context.clone()),
            facilities: FacilityService::new(context.clone()),
            payment_rates: PaymentRateService::new(context.clone()),
            reference_levels: ReferenceLevelService::new(context.clone()),
            context,
            his_sync,
        }
    }

    /// In-memory catalog driven by `clock`
    pub fn in_memory(config: &CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        info!(
            search_limit = config.search.default_limit,
            reference_prefix = %config.sequence.reference_level.prefix,
            "Initialising in-memory insurance catalog"
        );
        Self::new(CatalogContext::in_memory(config, clock), config.his_sync.clone())
    }

    /// In-memory catalog on the system clock
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::in_memory(config, Arc::new(SystemClock))
    }

    pub fn in_memory_default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }

    /// Run the demo HIS department sync and summarise it
    pub async fn sync_from_his(&self) -> CatalogResult<Notification> {
        let source = DemoHisSource::from_config(&self.his_sync);
        let summary = sync_departments(&self.departments, &source)
            .await
            .inspect_err(|err| err.log("his_sync.departments"))?;
        Ok(summary.notification())
    }
}
