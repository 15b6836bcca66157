use database_layer::{CheckConstraint, Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CodedRecord;
use crate::constraints::{BED_CODE_TYPE_UNIQ, BED_PRICE_CHECK};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedType {
    #[default]
    Bhyt,
    His,
}

impl BedType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bhyt => "bhyt",
            Self::His => "his",
        }
    }
}

/// Hospital bed; a HIS bed may point at the BHYT bed it is billed as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalBed {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub bed_type: BedType,
    pub department_id: Option<Uuid>,
    /// Price per day
    pub price: f64,
    pub bhyt_bed_id: Option<Uuid>,
}

impl HospitalBed {
    pub fn new(code: impl Into<String>, name: impl Into<String>, bed_type: BedType) -> Self {
        Self {
            id: Uuid::nil(),
            code: code.into(),
            name: name.into(),
            bed_type,
            department_id: None,
            price: 0.0,
            bhyt_bed_id: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn in_department(mut self, department_id: Uuid) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn mapped_to(mut self, bhyt_bed_id: Uuid) -> Self {
        self.bhyt_bed_id = Some(bhyt_bed_id);
        self
    }
}

impl CodedRecord for HospitalBed {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Row for HospitalBed {
    const TABLE: &'static str = "hic_hospital_bed";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::composite(
            &BED_CODE_TYPE_UNIQ,
            &[Some(&self.code), Some(self.bed_type.as_str())],
        )]
    }

    fn checks(&self) -> Vec<CheckConstraint> {
        vec![CheckConstraint::new(&BED_PRICE_CHECK, self.price >= 0.0)]
    }
}
