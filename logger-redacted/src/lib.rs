//! Logging for the HIC master-data engine with insurance-identifier redaction
//!
//! Medical staff records carry social insurance numbers and patients carry
//! BHYT card numbers. Neither may reach a log file in clear text, so any
//! message that could contain one goes through [`PiiRedactor`] first.
//!
//! # Detected Data Types
//!
//! - **Social insurance numbers**: 10 consecutive digits → `BHXH[hash]` or `**********`
//! - **BHYT card numbers**: 2 letters + 13 digits → `BHYT[hash]` or `DN*************`
//! - **Email Addresses**: user@example.com → u***@e***
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{LoggerConfig, PiiRedactor, RedactionConfig};
//!
//! let redactor = PiiRedactor::new(RedactionConfig {
//!     hash_for_correlation: false,
//!     ..Default::default()
//! });
//! assert_eq!(
//!     redactor.redact("staff insurance 0123456789 saved"),
//!     "staff insurance ********** saved"
//! );
//!
//! // Installs the global subscriber; later calls are rejected
//! let _ = logger_redacted::init_logging(&LoggerConfig::default());
//! ```
//!
//! # Configuration
//!
//! ```yaml
//! logging:
//!   level: info
//!   json: false
//!   redact_insurance_numbers: true
//! ```

pub mod redactor;
pub mod macros;
pub mod config;
pub mod init;

pub use redactor::*;
pub use config::*;
pub use init::*;
