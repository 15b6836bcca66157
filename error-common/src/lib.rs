//! Common error handling utilities for the HIC master-data engine
//!
//! Every write path in the catalog rejects bad input with exactly one kind of
//! error: a [`ValidationError`]. Validators, uniqueness checks, overlap checks
//! and storage-level constraint violations all end up here so that the caller
//! sees the same class of error regardless of which layer caught the problem.
//!
//! # Error Codes
//!
//! - **VALIDATION_1xxx**: field format, range and cross-record rules
//! - **DB_4xxx**: storage-level constraints reported by the persistence layer
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErrorContext, ValidationError};
//!
//! fn check_rate(rate: i32) -> Result<(), ValidationError> {
//!     if !(1..=100).contains(&rate) {
//!         return Err(ValidationError::new(
//!             codes::validation::OUT_OF_RANGE,
//!             "Benefit rate must be between 1 and 100!",
//!         )
//!         .with_context(ErrorContext::for_model("hic.benefit.code").with_field("benefit_rate")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rate(0).is_err());
//! assert!(check_rate(80).is_ok());
//! ```

pub mod types;
pub mod context;
pub mod codes;
pub mod reporting;

pub use types::*;
pub use context::*;
pub use reporting::*;
