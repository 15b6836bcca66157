use chrono::NaiveDate;
use database_layer::{Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraints::{
    STAFF_CERTIFICATE_CODE_UNIQUE, STAFF_HIS_CODE_UNIQUE, STAFF_INSURANCE_CODE_UNIQUE,
};

/// Insurance details of an employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalStaff {
    pub id: Uuid,
    pub name: String,
    pub his_code: String,
    /// Social insurance number, 10 digits
    pub bhyt_code: Option<String>,
    /// Practice certificate number
    pub certificate_code: Option<String>,
    pub certificate_date: Option<NaiveDate>,
    pub certificate_place: Option<String>,
    /// Category of type professional_title
    pub title_id: Option<Uuid>,
    /// Category of type medical_service_code
    pub service_id: Option<Uuid>,
}

impl MedicalStaff {
    pub fn new(his_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            his_code: his_code.into(),
            bhyt_code: None,
            certificate_code: None,
            certificate_date: None,
            certificate_place: None,
            title_id: None,
            service_id: None,
        }
    }

    pub fn with_bhyt_code(mut self, bhyt_code: impl Into<String>) -> Self {
        self.bhyt_code = Some(bhyt_code.into());
        self
    }

    pub fn with_certificate(
        mut self,
        code: impl Into<String>,
        issued_on: NaiveDate,
        place: impl Into<String>,
    ) -> Self {
        self.certificate_code = Some(code.into());
        self.certificate_date = Some(issued_on);
        self.certificate_place = Some(place.into());
        self
    }

    pub fn with_title(mut self, title_id: Uuid) -> Self {
        self.title_id = Some(title_id);
        self
    }

    pub fn with_service(mut self, service_id: Uuid) -> Self {
        self.service_id = Some(service_id);
        self
    }
}

impl Row for MedicalStaff {
    const TABLE: &'static str = "hr_employee";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::new(&STAFF_HIS_CODE_UNIQUE, &self.his_code),
            UniqueKey::nullable(&STAFF_INSURANCE_CODE_UNIQUE, self.bhyt_code.as_deref()),
            UniqueKey::nullable(&STAFF_CERTIFICATE_CODE_UNIQUE, self.certificate_code.as_deref()),
        ]
    }
}
