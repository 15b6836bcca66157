use chrono::NaiveDate;
use database_layer::{CheckConstraint, Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraints::{LEVEL_NUMBER_CHECK, REFERENCE_CODE_UNIQUE, REFERENCE_DATE_CHECK};
use crate::validation::ValidityPeriod;

/// Placeholder code replaced by the next sequence value on create
pub const NEW_REFERENCE_CODE: &str = "New";

/// Reference level coefficient applied over a closed period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLevel {
    pub id: Uuid,
    pub reference_code: String,
    pub level_number: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Set while `start_date` is not after today; locked rows cannot be deleted
    pub locked: bool,
}

impl ReferenceLevel {
    pub fn new(level_number: i32, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::nil(),
            reference_code: NEW_REFERENCE_CODE.to_string(),
            level_number,
            start_date,
            end_date,
            locked: false,
        }
    }

    pub fn has_placeholder_code(&self) -> bool {
        let code = self.reference_code.trim();
        code.is_empty() || code == NEW_REFERENCE_CODE
    }

    pub fn period(&self) -> ValidityPeriod {
        ValidityPeriod::bounded(self.start_date, self.end_date)
    }
}

impl Row for ReferenceLevel {
    const TABLE: &'static str = "hic_reference_level";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(&REFERENCE_CODE_UNIQUE, &self.reference_code)]
    }

    fn checks(&self) -> Vec<CheckConstraint> {
        vec![
            CheckConstraint::new(&LEVEL_NUMBER_CHECK, self.level_number > 0),
            CheckConstraint::new(&REFERENCE_DATE_CHECK, self.start_date < self.end_date),
        ]
    }
}
