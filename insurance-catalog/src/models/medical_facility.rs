use database_layer::{Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CodedRecord;
use crate::constraints::FACILITY_CODE_UNIQUE;

/// Medical facility (hospital) registered with BHYT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalFacility {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

impl MedicalFacility {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            code: code.into(),
            name: name.into(),
        }
    }
}

impl CodedRecord for MedicalFacility {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Row for MedicalFacility {
    const TABLE: &'static str = "hic_medical_facility";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(&FACILITY_CODE_UNIQUE, &self.code)]
    }
}
