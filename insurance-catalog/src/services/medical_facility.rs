use database_layer::Row;
use error_common::codes::validation;
use tracing::{debug, info};
use uuid::Uuid;

use super::{search_records, CatalogContext};
use crate::error::{reject_conflict, require_text, CatalogResult};
use crate::models::{CodedRecord, MedicalFacility, PaymentRate};

#[derive(Clone)]
pub struct FacilityService {
    ctx: CatalogContext,
}

impl FacilityService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, facility: MedicalFacility) -> CatalogResult<MedicalFacility> {
        self.save(facility, false)
            .await
            .inspect_err(|err| err.log("medical_facility.create"))
    }

    pub async fn update(&self, facility: MedicalFacility) -> CatalogResult<MedicalFacility> {
        self.save(facility, true)
            .await
            .inspect_err(|err| err.log("medical_facility.update"))
    }

    /// Delete a facility that no payment rate refers to
    pub async fn delete(&self, id: Uuid) -> CatalogResult<MedicalFacility> {
        self.remove(id)
            .await
            .inspect_err(|err| err.log("medical_facility.delete"))
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<MedicalFacility>> {
        Ok(self.ctx.facilities.get(id).await?)
    }

    /// All facilities ordered by code
    pub async fn list(&self) -> CatalogResult<Vec<MedicalFacility>> {
        let mut facilities = self.ctx.facilities.list().await?;
        facilities.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(facilities)
    }

    pub async fn search(&self, term: &str) -> CatalogResult<Vec<MedicalFacility>> {
        let found = search_records(self.list().await?, term, self.ctx.search_limit);
        debug!(term, count = found.len(), "Searched medical facilities");
        Ok(found)
    }

    async fn save(&self, facility: MedicalFacility, existing: bool) -> CatalogResult<MedicalFacility> {
        require_text(MedicalFacility::TABLE, "code", &facility.code, "Code")?;
        require_text(MedicalFacility::TABLE, "name", &facility.name, "Name")?;

        let saved = if existing {
            self.ctx.facilities.update(facility).await?
        } else {
            self.ctx.facilities.insert(facility).await?
        };
        info!(id = %saved.id, code = %saved.code, "Medical facility saved");
        Ok(saved)
    }

    async fn remove(&self, id: Uuid) -> CatalogResult<MedicalFacility> {
        let facility = self.ctx.facilities.require(id).await?;
        let rates = self
            .ctx
            .payment_rates
            .find(&move |rate: &PaymentRate| rate.medical_facility_id == id)
            .await?;
        if let Some(rate) = rates.first() {
            return Err(reject_conflict(
                validation::RECORD_IN_USE,
                MedicalFacility::TABLE,
                format!(
                    "{} is used by payment rate {} and cannot be deleted!",
                    facility.display_name(),
                    rate.code
                ),
                rate.code.clone(),
            ));
        }

        let removed = self.ctx.facilities.delete(id).await?;
        info!(id = %id, code = %removed.code, "Medical facility deleted");
        Ok(removed)
    }
}
