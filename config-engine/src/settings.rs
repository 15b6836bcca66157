use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};

/// Root configuration of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub sequence: SequenceSettings,
    pub logging: LoggerConfig,
    pub search: SearchConfig,
    pub his_sync: HisSyncConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSettings {
    pub reference_level: SequenceConfig,
}

/// Format of one named sequence: `prefix` followed by the zero-padded value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub prefix: String,
    pub padding: usize,
    pub start: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            prefix: "RL".to_string(),
            padding: 5,
            start: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 100 }
    }
}

/// Department list served by the demo HIS source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HisSyncConfig {
    pub departments: Vec<HisDepartmentEntry>,
}

impl Default for HisSyncConfig {
    fn default() -> Self {
        Self {
            departments: vec![
                HisDepartmentEntry::new("K01", "Khoa Khám bệnh"),
                HisDepartmentEntry::new("K02", "Khoa Hồi sức cấp cứu"),
                HisDepartmentEntry::new("K03", "Khoa Nội tổng hợp"),
                HisDepartmentEntry::new("K04", "Khoa Ngoại tổng hợp"),
                HisDepartmentEntry::new("K05", "Khoa Phụ sản"),
                HisDepartmentEntry::new("K06", "Khoa Nhi"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HisDepartmentEntry {
    pub his_code: String,
    pub name: String,
}

impl HisDepartmentEntry {
    pub fn new(his_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            his_code: his_code.into(),
            name: name.into(),
        }
    }
}
