use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggerConfig;
use crate::redactor::{PiiRedactor, RedactionConfig};

static GLOBAL_REDACTOR: OnceLock<PiiRedactor> = OnceLock::new();

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global `tracing` subscriber and redactor
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|_| LoggerError::InvalidFilter(config.level.clone()))?,
    };

    let redactor_installed = install_redactor(config);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    if !redactor_installed {
        tracing::warn!(
            redact_insurance_numbers = config.redact_insurance_numbers,
            hash_for_correlation = config.hash_for_correlation,
            "Redactor was used before logging was initialised; configured redaction rules are ignored"
        );
    }
    Ok(())
}

/// Install the redactor for `config`, false when one is already in place
fn install_redactor(config: &LoggerConfig) -> bool {
    GLOBAL_REDACTOR
        .set(PiiRedactor::new(RedactionConfig::from(config)))
        .is_ok()
}

/// Redact text with the redactor installed by [`init_logging`]
///
/// Falls back to the default redaction rules when logging was never initialised.
pub fn redact(text: &str) -> String {
    GLOBAL_REDACTOR
        .get_or_init(|| PiiRedactor::new(RedactionConfig::default()))
        .redact(text)
}

impl From<&LoggerConfig> for RedactionConfig {
    fn from(config: &LoggerConfig) -> Self {
        Self {
            redact_insurance_numbers: config.redact_insurance_numbers,
            redact_card_numbers: config.redact_insurance_numbers,
            hash_for_correlation: config.hash_for_correlation,
            ..Self::default()
        }
    }
}
