use database_layer::Row;
use error_common::codes::validation;
use tracing::{debug, info};
use uuid::Uuid;

use super::CatalogContext;
use crate::constraints::{BENEFIT_CODE_CHECK, BENEFIT_CODE_UNIQ, BENEFIT_RATE_CHECK};
use crate::error::{reject, reject_conflict, CatalogResult};
use crate::models::{BenefitCode, Category};

#[derive(Clone)]
pub struct BenefitCodeService {
    ctx: CatalogContext,
}

impl BenefitCodeService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, benefit: BenefitCode) -> CatalogResult<BenefitCode> {
        self.insert(benefit)
            .await
            .inspect_err(|err| err.log("benefit_code.create"))
    }

    pub async fn update(&self, benefit: BenefitCode) -> CatalogResult<BenefitCode> {
        self.replace(benefit)
            .await
            .inspect_err(|err| err.log("benefit_code.update"))
    }

    /// Delete a benefit code; categories pointing at it lose the reference
    pub async fn delete(&self, id: Uuid) -> CatalogResult<BenefitCode> {
        let removed = self.ctx.benefit_codes.delete(id).await?;
        let referencing = self
            .ctx
            .categories
            .find(&move |category: &Category| category.benefit_code_id == Some(id))
            .await?;
        for mut category in referencing {
            category.benefit_code_id = None;
            self.ctx.categories.update(category).await?;
        }
        info!(id = %id, benefit_code = removed.benefit_code, "Benefit code deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<BenefitCode>> {
        Ok(self.ctx.benefit_codes.get(id).await?)
    }

    /// All benefit codes ordered by code
    pub async fn list(&self) -> CatalogResult<Vec<BenefitCode>> {
        let mut codes = self.ctx.benefit_codes.list().await?;
        codes.sort_by_key(|benefit| benefit.benefit_code);
        debug!(count = codes.len(), "Listed benefit codes");
        Ok(codes)
    }

    pub async fn find_by_code(&self, benefit_code: i32) -> CatalogResult<Option<BenefitCode>> {
        let found = self
            .ctx
            .benefit_codes
            .find(&move |benefit: &BenefitCode| benefit.benefit_code == benefit_code)
            .await?;
        Ok(found.into_iter().next())
    }

    async fn insert(&self, benefit: BenefitCode) -> CatalogResult<BenefitCode> {
        self.validate(&benefit).await?;
        let created = self.ctx.benefit_codes.insert(benefit).await?;
        info!(id = %created.id, benefit_code = created.benefit_code, "Benefit code created");
        Ok(created)
    }

    async fn replace(&self, benefit: BenefitCode) -> CatalogResult<BenefitCode> {
        self.validate(&benefit).await?;
        let updated = self.ctx.benefit_codes.update(benefit).await?;
        info!(id = %updated.id, benefit_code = updated.benefit_code, "Benefit code updated");
        Ok(updated)
    }

    async fn validate(&self, benefit: &BenefitCode) -> CatalogResult<()> {
        if benefit.benefit_code < 1 {
            return Err(reject(validation::OUT_OF_RANGE, BenefitCode::TABLE, BENEFIT_CODE_CHECK.message));
        }
        if !(1..=100).contains(&benefit.benefit_rate) {
            return Err(reject(validation::OUT_OF_RANGE, BenefitCode::TABLE, BENEFIT_RATE_CHECK.message));
        }

        let (id, code) = (benefit.id, benefit.benefit_code);
        let duplicates = self
            .ctx
            .benefit_codes
            .find(&move |other: &BenefitCode| other.id != id && other.benefit_code == code)
            .await?;
        if let Some(existing) = duplicates.first() {
            return Err(reject_conflict(
                validation::DUPLICATE_CODE,
                BenefitCode::TABLE,
                BENEFIT_CODE_UNIQ.message,
                existing.display_name(),
            ));
        }
        Ok(())
    }
}
