//! BHYT health-insurance master data for the hospital information system
//!
//! Provides the reference tables the claim module depends on, with the
//! validation that keeps them consistent:
//! - Benefit codes and coverage rates
//! - Coded categories (technical level, professional title, object codes, ...)
//!   with per-type code formats
//! - BHYT ↔ HIS department and hospital bed mappings
//! - Medical staff insurance and practice-certificate details
//! - Medical facilities and their payment rates, free of overlapping periods
//! - Reference levels with sequential codes and delete locking
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use insurance_catalog::{Category, CategoryType, InsuranceCatalog, MedicalFacility, PaymentRate};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let catalog = InsuranceCatalog::in_memory_default();
//!
//! let facility = catalog.facilities.create(MedicalFacility::new("01001", "Bệnh viện Bạch Mai")).await?;
//! let level = catalog
//!     .categories
//!     .create(Category::new("1", "Hạng đặc biệt", CategoryType::TechnicalLevel))
//!     .await?;
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! catalog.payment_rates
//!     .create(PaymentRate::new("PR01", facility.id, level.id, date(1, 1), Some(date(6, 30))))
//!     .await?;
//!
//! let overlapping = PaymentRate::new("PR02", facility.id, level.id, date(6, 1), Some(date(12, 31)));
//! assert!(catalog.payment_rates.create(overlapping).await.is_err());
//! # Ok::<(), insurance_catalog::CatalogError>(())
//! # }).unwrap();
//! ```

pub mod actions;
pub mod clock;
pub mod constraints;
pub mod error;
pub mod models;
pub mod services;
pub mod validation;

pub use actions::*;
pub use clock::*;
pub use error::*;
pub use models::*;
pub use services::*;
