use std::collections::HashMap;

use database_layer::Row;
use error_common::codes::validation;
use tracing::{debug, info};
use uuid::Uuid;

use super::category::require_category;
use super::CatalogContext;
use crate::constraints::{INPATIENT_RATE_CHECK, OUTPATIENT_RATE_CHECK, PAYMENT_RATE_DATE_CHECK};
use crate::error::{reject, reject_conflict, require_text, CatalogResult};
use crate::models::{contains_ignore_case, round_rate, CategoryType, MedicalFacility, PaymentRate};
use crate::validation::find_overlap;

#[derive(Clone)]
pub struct PaymentRateService {
    ctx: CatalogContext,
}

impl PaymentRateService {
    pub fn new(ctx: CatalogContext) -> Self {
        Self { ctx }
    }

    /// New rate valid from today, open-ended
    pub fn draft(
        &self,
        code: impl Into<String>,
        medical_facility_id: Uuid,
        technical_level_id: Uuid,
    ) -> PaymentRate {
        PaymentRate::new(code, medical_facility_id, technical_level_id, self.ctx.clock.today(), None)
    }

    /// Create a rate; its period must not overlap any rate of the same
    /// facility and technical level
    pub async fn create(&self, rate: PaymentRate) -> CatalogResult<PaymentRate> {
        self.save(rate, false)
            .await
            .inspect_err(|err| err.log("payment_rate.create"))
    }

    pub async fn update(&self, rate: PaymentRate) -> CatalogResult<PaymentRate> {
        self.save(rate, true)
            .await
            .inspect_err(|err| err.log("payment_rate.update"))
    }

    pub async fn delete(&self, id: Uuid) -> CatalogResult<PaymentRate> {
        let removed = self.ctx.payment_rates.delete(id).await?;
        info!(id = %id, code = %removed.code, "Payment rate deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<PaymentRate>> {
        Ok(self.ctx.payment_rates.get(id).await?)
    }

    /// All rates ordered by code
    pub async fn list(&self) -> CatalogResult<Vec<PaymentRate>> {
        let mut rates = self.ctx.payment_rates.list().await?;
        rates.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(rates)
    }

    /// Rates of one facility and technical level, oldest period first
    pub async fn for_scope(
        &self,
        medical_facility_id: Uuid,
        technical_level_id: Uuid,
    ) -> CatalogResult<Vec<PaymentRate>> {
        let mut rates = self
            .ctx
            .payment_rates
            .find(&move |rate: &PaymentRate| {
                rate.medical_facility_id == medical_facility_id
                    && rate.technical_level_id == technical_level_id
            })
            .await?;
        rates.sort_by_key(|rate| rate.date_from);
        Ok(rates)
    }

    /// `"[code] facility - technical level"`
    pub async fn display_name(&self, rate: &PaymentRate) -> CatalogResult<String> {
        let facility = self.ctx.facilities.get(rate.medical_facility_id).await?;
        let level = self.ctx.categories.get(rate.technical_level_id).await?;
        Ok(format!(
            "[{}] {} - {}",
            rate.code,
            facility.map(|facility| facility.name).unwrap_or_default(),
            level.map(|level| level.name).unwrap_or_default()
        ))
    }

    /// Rates whose code, facility name or code, or technical level name contains `term`
    pub async fn search(&self, term: &str) -> CatalogResult<Vec<PaymentRate>> {
        let term = term.trim();
        let facilities: HashMap<Uuid, MedicalFacility> = self
            .ctx
            .facilities
            .list()
            .await?
            .into_iter()
            .map(|facility| (facility.id, facility))
            .collect();
        let levels: HashMap<Uuid, String> = self
            .ctx
            .categories
            .list()
            .await?
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();

        let found: Vec<PaymentRate> = self
            .list()
            .await?
            .into_iter()
            .filter(|rate| {
                if term.is_empty() || contains_ignore_case(&rate.code, term) {
                    return true;
                }
                let facility_hit = facilities.get(&rate.medical_facility_id).is_some_and(|facility| {
                    contains_ignore_case(&facility.name, term) || contains_ignore_case(&facility.code, term)
                });
                let level_hit = levels
                    .get(&rate.technical_level_id)
                    .is_some_and(|name| contains_ignore_case(name, term));
                facility_hit || level_hit
            })
            .take(self.ctx.search_limit)
            .collect();
        debug!(term, count = found.len(), "Searched payment rates");
        Ok(found)
    }

    async fn save(&self, mut rate: PaymentRate, existing: bool) -> CatalogResult<PaymentRate> {
        rate.outpatient_rate = round_rate(rate.outpatient_rate);
        rate.inpatient_rate = round_rate(rate.inpatient_rate);
        self.validate(&rate).await?;

        let saved = if existing {
            self.ctx.payment_rates.update(rate).await?
        } else {
            self.ctx.payment_rates.insert(rate).await?
        };
        info!(
            id = %saved.id,
            code = %saved.code,
            date_from = %saved.date_from,
            date_to = ?saved.date_to,
            "Payment rate saved"
        );
        Ok(saved)
    }

    async fn validate(&self, rate: &PaymentRate) -> CatalogResult<()> {
        require_text(PaymentRate::TABLE, "code", &rate.code, "Code")?;

        let in_range = |value: f64| (0.0..=100.0).contains(&value);
        if !in_range(rate.outpatient_rate) {
            return Err(reject(validation::OUT_OF_RANGE, PaymentRate::TABLE, OUTPATIENT_RATE_CHECK.message));
        }
        if !in_range(rate.inpatient_rate) {
            return Err(reject(validation::OUT_OF_RANGE, PaymentRate::TABLE, INPATIENT_RATE_CHECK.message));
        }
        if rate.date_to.is_some_and(|date_to| date_to < rate.date_from) {
            return Err(reject(validation::INVALID_PERIOD, PaymentRate::TABLE, PAYMENT_RATE_DATE_CHECK.message));
        }

        let Some(facility) = self.ctx.facilities.get(rate.medical_facility_id).await? else {
            return Err(reject(
                validation::INVALID_REFERENCE,
                PaymentRate::TABLE,
                "Hospital does not exist!",
            ));
        };
        let level = require_category(
            &self.ctx,
            rate.technical_level_id,
            CategoryType::TechnicalLevel,
            PaymentRate::TABLE,
            "Technical level",
        )
        .await?;

        let candidate = rate.clone();
        let same_scope = self
            .ctx
            .payment_rates
            .find(&move |other: &PaymentRate| other.id != candidate.id && other.same_scope(&candidate))
            .await?;
        if let Some(overlapping) = find_overlap(&rate.period(), &same_scope, PaymentRate::period) {
            return Err(reject_conflict(
                validation::OVERLAPPING_PERIOD,
                PaymentRate::TABLE,
                format!(
                    "Payment rate already exists for hospital \"{}\" and technical level \"{}\" in this time period!",
                    facility.name, level.name
                ),
                overlapping.code.clone(),
            )
            .with_record(overlapping.id));
        }
        Ok(())
    }
}
