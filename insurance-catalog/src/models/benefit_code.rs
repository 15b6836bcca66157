use database_layer::{CheckConstraint, Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraints::{BENEFIT_CODE_CHECK, BENEFIT_CODE_UNIQ, BENEFIT_RATE_CHECK};

/// Health-insurance benefit code and its coverage rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitCode {
    pub id: Uuid,
    pub benefit_code: i32,
    /// Coverage percentage
    pub benefit_rate: i32,
    pub is_payment_condition_applied: bool,
    pub is_transport_cost_covered: bool,
    pub is_non_bhyt_cost_paid: bool,
    pub active: bool,
}

impl BenefitCode {
    pub fn new(benefit_code: i32, benefit_rate: i32) -> Self {
        Self {
            id: Uuid::nil(),
            benefit_code,
            benefit_rate,
            is_payment_condition_applied: false,
            is_transport_cost_covered: false,
            is_non_bhyt_cost_paid: false,
            active: true,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}%", self.benefit_code, self.benefit_rate)
    }
}

impl Row for BenefitCode {
    const TABLE: &'static str = "hic_benefit_code";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(&BENEFIT_CODE_UNIQ, self.benefit_code.to_string())]
    }

    fn checks(&self) -> Vec<CheckConstraint> {
        vec![
            CheckConstraint::new(&BENEFIT_CODE_CHECK, self.benefit_code >= 1),
            CheckConstraint::new(&BENEFIT_RATE_CHECK, (1..=100).contains(&self.benefit_rate)),
        ]
    }
}
