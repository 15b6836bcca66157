// Configuration providers (defaults, file, environment)
use std::path::PathBuf;

use config::{Config, Environment, File};
use tracing::debug;

use crate::error::Result;
use crate::settings::CatalogConfig;
use crate::validation::ConfigValidator;

pub const ENV_PREFIX: &str = "HIC";

/// One layer of configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File { path: PathBuf, required: bool },
    Env { prefix: String },
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: false,
        }
    }

    pub fn env() -> Self {
        Self::Env {
            prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn env_with_prefix(prefix: impl Into<String>) -> Self {
        Self::Env {
            prefix: prefix.into(),
        }
    }
}

/// Builds a [`CatalogConfig`] from the registered sources, in order
#[derive(Debug, Clone, Default)]
pub struct ConfigEngine {
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Merge defaults with every source, then validate
    pub fn load(&self) -> Result<CatalogConfig> {
        let mut builder = Config::builder().add_source(Config::try_from(&CatalogConfig::default())?);

        for source in &self.sources {
            builder = match source {
                ConfigSource::File { path, required } => {
                    debug!(path = %path.display(), required, "Adding configuration file");
                    builder.add_source(File::from(path.clone()).required(*required))
                }
                ConfigSource::Env { prefix } => builder.add_source(
                    Environment::with_prefix(prefix)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
            };
        }

        let config: CatalogConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
