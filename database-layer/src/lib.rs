//! Storage layer for the HIC master-data engine
//!
//! The catalog never talks to a database directly. It goes through the
//! [`Repository`] trait, and every table declares its named constraints on the
//! row type ([`Row::unique_keys`], [`Row::checks`]). The in-memory
//! implementation enforces those constraints itself; a PostgreSQL deployment
//! enforces the same names through `migrations/001_insurance_catalog.sql` and
//! reports them back through [`DatabaseError::from_sqlx`].
//!
//! # Key Features
//!
//! - **Named constraints**: unique and check constraints carry the message shown to users
//! - **Atomic writes**: constraint checks and the mutation happen under one write lock
//! - **Named sequences**: monotonic counters handed out with an atomic increment
//!
//! # Example Usage
//!
//! ```rust
//! use database_layer::{ConstraintDef, InMemoryRepository, Repository, Row, UniqueKey};
//! use uuid::Uuid;
//!
//! static FACILITY_CODE: ConstraintDef = ConstraintDef::new(
//!     "medical_facility_code_unique",
//!     "hic_medical_facility",
//!     "Medical facility code must be unique!",
//! );
//!
//! #[derive(Clone)]
//! struct Facility {
//!     id: Uuid,
//!     code: String,
//! }
//!
//! impl Row for Facility {
//!     const TABLE: &'static str = "hic_medical_facility";
//!     fn id(&self) -> Uuid { self.id }
//!     fn set_id(&mut self, id: Uuid) { self.id = id; }
//!     fn unique_keys(&self) -> Vec<UniqueKey> {
//!         vec![UniqueKey::new(&FACILITY_CODE, &self.code)]
//!     }
//! }
//!
//! # tokio_test_block(async {
//! let repo = InMemoryRepository::<Facility>::new();
//! repo.insert(Facility { id: Uuid::nil(), code: "01001".into() }).await.unwrap();
//! let duplicate = repo.insert(Facility { id: Uuid::nil(), code: "01001".into() }).await;
//! assert!(duplicate.is_err());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod constraint;
pub mod error;
pub mod repository;
pub mod sequence;

pub use constraint::*;
pub use error::*;
pub use repository::*;
pub use sequence::*;

/// Schema applied by PostgreSQL deployments
pub const SCHEMA_SQL: &str = include_str!("../migrations/001_insurance_catalog.sql");
