// Configuration validation and schema enforcement
use std::collections::HashSet;

use crate::error::{ConfigError, Result};
use crate::settings::{CatalogConfig, SequenceConfig};

pub trait ConfigValidator {
    fn validate(&self) -> Result<()>;
}

impl ConfigValidator for SequenceConfig {
    fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "sequence prefix must not be empty".to_string(),
            ));
        }
        if !(1..=12).contains(&self.padding) {
            return Err(ConfigError::ValidationError(format!(
                "sequence padding must be between 1 and 12, got {}",
                self.padding
            )));
        }
        if self.start == 0 {
            return Err(ConfigError::ValidationError(
                "sequence start must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ConfigValidator for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.sequence.reference_level.validate()?;

        if self.search.default_limit == 0 {
            return Err(ConfigError::ValidationError(
                "search.default_limit must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.his_sync.departments {
            let code = entry.his_code.trim();
            if code.is_empty() || code.chars().count() > 10 {
                return Err(ConfigError::ValidationError(format!(
                    "his_sync department code '{}' must be 1 to 10 characters",
                    entry.his_code
                )));
            }
            if !seen.insert(code.to_string()) {
                return Err(ConfigError::ValidationError(format!(
                    "his_sync department code '{code}' is listed twice"
                )));
            }
        }
        Ok(())
    }
}
