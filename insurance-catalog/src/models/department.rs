use std::collections::BTreeSet;

use database_layer::{Row, UniqueKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ignore_case, optional_contains, CodedRecord};
use crate::constraints::{DEPARTMENT_BHYT_CODE_UNIQ, DEPARTMENT_HIS_CODE_UNIQ};

/// Maximum length of BHYT and HIS department codes
pub const DEPARTMENT_CODE_MAX_LEN: usize = 10;

/// Which scheme a department row belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentSource {
    Bhyt,
    #[default]
    His,
}

/// Hospital department, either as declared to BHYT or as known to the HIS
///
/// A BHYT department maps to any number of HIS departments through
/// `his_department_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub department_source: DepartmentSource,
    pub bhyt_code: Option<String>,
    pub bhyt_name: Option<String>,
    pub his_code: Option<String>,
    pub patient_department: bool,
    #[serde(default)]
    pub his_department_ids: BTreeSet<Uuid>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            department_source: DepartmentSource::default(),
            bhyt_code: None,
            bhyt_name: None,
            his_code: None,
            patient_department: false,
            his_department_ids: BTreeSet::new(),
        }
    }

    pub fn his(his_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            his_code: Some(his_code.into()),
            ..Self::new(name)
        }
    }

    pub fn bhyt(bhyt_code: impl Into<String>, bhyt_name: impl Into<String>) -> Self {
        let bhyt_name = bhyt_name.into();
        Self {
            department_source: DepartmentSource::Bhyt,
            bhyt_code: Some(bhyt_code.into()),
            bhyt_name: Some(bhyt_name.clone()),
            patient_department: true,
            ..Self::new(bhyt_name)
        }
    }

    pub fn with_his_departments(mut self, ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.his_department_ids = ids.into_iter().collect();
        self
    }

    pub fn is_bhyt(&self) -> bool {
        self.department_source == DepartmentSource::Bhyt
    }

    /// Number of HIS departments mapped to this one
    pub fn mapping_count(&self) -> usize {
        self.his_department_ids.len()
    }
}

impl CodedRecord for Department {
    fn code(&self) -> &str {
        match self.department_source {
            DepartmentSource::Bhyt => self.bhyt_code.as_deref().unwrap_or_default(),
            DepartmentSource::His => self.his_code.as_deref().unwrap_or_default(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> String {
        match (self.department_source, &self.bhyt_code, &self.his_code) {
            (DepartmentSource::Bhyt, Some(code), _) if !code.is_empty() => {
                let name = self
                    .bhyt_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(&self.name);
                format!("🏥 [{code}] {name}")
            }
            (DepartmentSource::His, _, Some(code)) if !code.is_empty() => {
                format!("💻 [HIS-{code}] {}", self.name)
            }
            _ => self.name.clone(),
        }
    }

    fn matches_search(&self, term: &str) -> bool {
        optional_contains(self.bhyt_code.as_deref(), term)
            || optional_contains(self.bhyt_name.as_deref(), term)
            || optional_contains(self.his_code.as_deref(), term)
            || contains_ignore_case(&self.name, term)
    }
}

impl Row for Department {
    const TABLE: &'static str = "hr_department";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::nullable(&DEPARTMENT_BHYT_CODE_UNIQ, self.bhyt_code.as_deref()),
            UniqueKey::nullable(&DEPARTMENT_HIS_CODE_UNIQ, self.his_code.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_depends_on_source() {
        let bhyt = Department::bhyt("K01", "Khoa Khám bệnh");
        assert_eq!(bhyt.display_name(), "🏥 [K01] Khoa Khám bệnh");

        let his = Department::his("KB", "Phòng khám");
        assert_eq!(his.display_name(), "💻 [HIS-KB] Phòng khám");

        let plain = Department::new("Hành chính");
        assert_eq!(plain.display_name(), "Hành chính");
    }

    #[test]
    fn bhyt_display_falls_back_to_name() {
        let mut bhyt = Department::bhyt("K02", "");
        bhyt.name = "Khoa Nội".to_string();
        assert_eq!(bhyt.display_name(), "🏥 [K02] Khoa Nội");
    }

    #[test]
    fn search_covers_both_codes_and_names() {
        let mut dept = Department::bhyt("K03", "Khoa Ngoại");
        dept.his_code = Some("NGOAI".to_string());
        assert!(dept.matches_search("k03"));
        assert!(dept.matches_search("ngoại"));
        assert!(dept.matches_search("ngoai"));
        assert!(!dept.matches_search("nhi"));
    }

    #[test]
    fn default_source_is_his() {
        assert_eq!(Department::new("x").department_source, DepartmentSource::His);
    }
}
