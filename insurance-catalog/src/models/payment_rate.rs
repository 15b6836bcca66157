use chrono::NaiveDate;
use database_layer::{CheckConstraint, Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraints::{
    INPATIENT_RATE_CHECK, OUTPATIENT_RATE_CHECK, PAYMENT_RATE_CODE_UNIQUE, PAYMENT_RATE_DATE_CHECK,
};
use crate::validation::ValidityPeriod;

/// Payment percentages agreed for a facility and technical level over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRate {
    pub id: Uuid,
    pub code: String,
    pub medical_facility_id: Uuid,
    /// Category of type technical_level
    pub technical_level_id: Uuid,
    pub outpatient_rate: f64,
    pub inpatient_rate: f64,
    pub date_from: NaiveDate,
    /// Open-ended when unset
    pub date_to: Option<NaiveDate>,
}

impl PaymentRate {
    pub fn new(
        code: impl Into<String>,
        medical_facility_id: Uuid,
        technical_level_id: Uuid,
        date_from: NaiveDate,
        date_to: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            code: code.into(),
            medical_facility_id,
            technical_level_id,
            outpatient_rate: 0.0,
            inpatient_rate: 0.0,
            date_from,
            date_to,
        }
    }

    pub fn with_rates(mut self, outpatient_rate: f64, inpatient_rate: f64) -> Self {
        self.outpatient_rate = outpatient_rate;
        self.inpatient_rate = inpatient_rate;
        self
    }

    pub fn period(&self) -> ValidityPeriod {
        ValidityPeriod::new(self.date_from, self.date_to)
    }

    /// Whether both rows are scoped to the same facility and technical level
    pub fn same_scope(&self, other: &PaymentRate) -> bool {
        self.medical_facility_id == other.medical_facility_id
            && self.technical_level_id == other.technical_level_id
    }
}

/// Round a percentage to the two decimals the column stores
pub fn round_rate(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}

impl Row for PaymentRate {
    const TABLE: &'static str = "hic_payment_rate";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(&PAYMENT_RATE_CODE_UNIQUE, &self.code)]
    }

    fn checks(&self) -> Vec<CheckConstraint> {
        let in_range = |rate: f64| (0.0..=100.0).contains(&rate);
        vec![
            CheckConstraint::new(&OUTPATIENT_RATE_CHECK, in_range(self.outpatient_rate)),
            CheckConstraint::new(&INPATIENT_RATE_CHECK, in_range(self.inpatient_rate)),
            CheckConstraint::new(
                &PAYMENT_RATE_DATE_CHECK,
                self.date_to.map_or(true, |date_to| date_to >= self.date_from),
            ),
        ]
    }
}
