use std::fmt;

use database_layer::{Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CodedRecord;
use crate::constraints::CATEGORY_CODE_TYPE_UNIQ;

/// Classification of a [`Category`]; each type carries its own code format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    TechnicalLevel,
    ProfessionalTitle,
    MedicalServiceCode,
    BhytObjectCode,
    KcbObjectCode,
    DischargeTypeCode,
    AccidentCode,
}

impl CategoryType {
    pub const ALL: [CategoryType; 7] = [
        Self::TechnicalLevel,
        Self::ProfessionalTitle,
        Self::MedicalServiceCode,
        Self::BhytObjectCode,
        Self::KcbObjectCode,
        Self::DischargeTypeCode,
        Self::AccidentCode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TechnicalLevel => "technical_level",
            Self::ProfessionalTitle => "professional_title",
            Self::MedicalServiceCode => "medical_service_code",
            Self::BhytObjectCode => "bhyt_object_code",
            Self::KcbObjectCode => "kcb_object_code",
            Self::DischargeTypeCode => "discharge_type_code",
            Self::AccidentCode => "accident_code",
        }
    }

    /// Human label used in messages
    pub fn label(self) -> &'static str {
        match self {
            Self::TechnicalLevel => "Technical Level",
            Self::ProfessionalTitle => "Professional Title",
            Self::MedicalServiceCode => "Medical Service Code",
            Self::BhytObjectCode => "BHYT Object Code",
            Self::KcbObjectCode => "KCB Object Code",
            Self::DischargeTypeCode => "Discharge Type Code",
            Self::AccidentCode => "Accident Code",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coded reference entry, interpreted according to its type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub benefit_code_id: Option<Uuid>,
    pub category_type: CategoryType,
    pub active: bool,
}

impl Category {
    pub fn new(code: impl Into<String>, name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            id: Uuid::nil(),
            code: code.into(),
            name: name.into(),
            description: None,
            benefit_code_id: None,
            category_type,
            active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_benefit_code(mut self, benefit_code_id: Uuid) -> Self {
        self.benefit_code_id = Some(benefit_code_id);
        self
    }
}

impl CodedRecord for Category {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Row for Category {
    const TABLE: &'static str = "hic_category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::composite(
            &CATEGORY_CODE_TYPE_UNIQ,
            &[Some(&self.code), Some(self.category_type.as_str())],
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_type_serializes_as_snake_case() {
        let json = serde_json::to_string(&CategoryType::KcbObjectCode).unwrap();
        assert_eq!(json, "\"kcb_object_code\"");
        for category_type in CategoryType::ALL {
            let encoded = serde_json::to_string(&category_type).unwrap();
            assert_eq!(encoded.trim_matches('"'), category_type.as_str());
        }
    }

    #[test]
    fn display_name_uses_code_and_name() {
        let category = Category::new("01", "Bác sĩ", CategoryType::ProfessionalTitle);
        assert_eq!(category.display_name(), "[01] Bác sĩ");
        assert!(category.matches_search("bác"));
        assert!(!category.matches_search("02"));
    }
}
