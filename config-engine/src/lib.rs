//! Configuration management for the HIC master-data engine
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. **Built-in defaults** ([`CatalogConfig::default`])
//! 2. **Local file**: YAML, TOML or JSON (`hic.yaml` by convention)
//! 3. **Environment variables**: `HIC_` prefix, `__` between nested keys,
//!    e.g. `HIC_SEQUENCE__REFERENCE_LEVEL__PREFIX=RL`
//!
//! The merged result is validated before it is handed out.
//!
//! # Example
//!
//! ```rust
//! use config_engine::{ConfigEngine, ConfigSource};
//!
//! let config = ConfigEngine::new()
//!     .add_source(ConfigSource::optional_file("hic.yaml"))
//!     .add_source(ConfigSource::env())
//!     .load()
//!     .unwrap();
//!
//! assert!(config.search.default_limit > 0);
//! ```

pub mod settings;
pub mod providers;
pub mod validation;
pub mod error;

pub use settings::*;
pub use providers::*;
pub use validation::*;
pub use error::*;
