// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub json: bool,
    pub redact_insurance_numbers: bool,
    pub hash_for_correlation: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            redact_insurance_numbers: true,
            hash_for_correlation: true,
        }
    }
}
