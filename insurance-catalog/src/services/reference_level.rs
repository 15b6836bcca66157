use database_layer::Row;
use error_common::codes::validation;
use tracing::info;
use uuid::Uuid;

use super::{CatalogContext, REFERENCE_LEVEL_SEQUENCE};
use crate::constraints::{LEVEL_NUMBER_CHECK, REFERENCE_DATE_CHECK};
use crate::error::{reject, reject_conflict, CatalogResult};
use crate::models::ReferenceLevel;
use crate::validation::find_overlap;

#[derive(Clone)]
pub struct ReferenceLevelService {
    ctx: CatalogContext,
}

impl ReferenceLevelService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    /// Create a reference level
    ///
    /// A missing or `"New"` code is replaced by the next value of the
    /// `hic.reference.level` sequence. The period must not overlap any other
    /// reference level.
    pub async fn create(&self, level: ReferenceLevel) -> CatalogResult<ReferenceLevel> {
        self.insert(level)
            .await
            .inspect_err(|err| err.log("reference_level.create"))
    }

    pub async fn update(&self, level: ReferenceLevel) -> CatalogResult<ReferenceLevel> {
        self.replace(level)
            .await
            .inspect_err(|err| err.log("reference_level.update"))
    }

    /// Delete a reference level that has not started yet
    pub async fn delete(&self, id: Uuid) -> CatalogResult<ReferenceLevel> {
        self.remove(id)
            .await
            .inspect_err(|err| err.log("reference_level.delete"))
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<ReferenceLevel>> {
        Ok(self.ctx.reference_levels.get(id).await?)
    }

    /// All reference levels, latest end date first
    pub async fn list(&self) -> CatalogResult<Vec<ReferenceLevel>> {
        let mut levels = self.ctx.reference_levels.list().await?;
        levels.sort_by(|a, b| b.end_date.cmp(&a.end_date));
        Ok(levels)
    }

    async fn insert(&self, mut level: ReferenceLevel) -> CatalogResult<ReferenceLevel> {
        self.validate(&level).await?;
        if level.has_placeholder_code() {
            level.reference_code = self.ctx.sequences.next_by_code(REFERENCE_LEVEL_SEQUENCE)?;
        }
        level.locked = level.start_date <= self.ctx.clock.today();

        let created = self.ctx.reference_levels.insert(level).await?;
        info!(
            id = %created.id,
            reference_code = %created.reference_code,
            locked = created.locked,
            "Reference level created"
        );
        Ok(created)
    }

    async fn replace(&self, mut level: ReferenceLevel) -> CatalogResult<ReferenceLevel> {
        let stored = self.ctx.reference_levels.require(level.id).await?;
        if level.has_placeholder_code() {
            level.reference_code = stored.reference_code;
        }
        self.validate(&level).await?;
        level.locked = level.start_date <= self.ctx.clock.today();

        let updated = self.ctx.reference_levels.update(level).await?;
        info!(
            id = %updated.id,
            reference_code = %updated.reference_code,
            locked = updated.locked,
            "Reference level updated"
        );
        Ok(updated)
    }

    async fn remove(&self, id: Uuid) -> CatalogResult<ReferenceLevel> {
        let level = self.ctx.reference_levels.require(id).await?;
        // The stored flag lags behind the clock once the start date passes
        if level.locked || level.start_date <= self.ctx.clock.today() {
            return Err(reject(
                validation::LOCKED_RECORD,
                ReferenceLevel::TABLE,
                "The reference level has been used for assessment and the start date is in the past. \
                 Cannot be deleted.",
            )
            .with_record(id));
        }
        let removed = self.ctx.reference_levels.delete(id).await?;
        info!(id = %id, reference_code = %removed.reference_code, "Reference level deleted");
        Ok(removed)
    }

    async fn validate(&self, level: &ReferenceLevel) -> CatalogResult<()> {
        if level.level_number <= 0 {
            return Err(reject(validation::OUT_OF_RANGE, ReferenceLevel::TABLE, LEVEL_NUMBER_CHECK.message));
        }
        if level.start_date >= level.end_date {
            return Err(reject(validation::INVALID_PERIOD, ReferenceLevel::TABLE, REFERENCE_DATE_CHECK.message));
        }

        let id = level.id;
        let others = self
            .ctx
            .reference_levels
            .find(&move |other: &ReferenceLevel| other.id != id)
            .await?;
        if let Some(overlapping) = find_overlap(&level.period(), &others, ReferenceLevel::period) {
            return Err(reject_conflict(
                validation::OVERLAPPING_PERIOD,
                ReferenceLevel::TABLE,
                format!(
                    "The reference level time is overlapping with the reference level {}. Please check again.",
                    overlapping.reference_code
                ),
                overlapping.reference_code.clone(),
            )
            .with_record(overlapping.id));
        }
        Ok(())
    }
}
