//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod merge;
pub mod partial;

pub use partial::PartialConfig;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Configuration source for layered loading
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Environment,
    /// Programmatic overrides
    Explicit(PartialConfig),
}

/// Builder for loading and merging configurations
///
/// Precedence: defaults < file < environment < explicit overrides,
/// in the order sources are added. A source overrides exactly the fields it
/// sets, even when the value equals the default.
///
/// # Example
///
/// ```no_run
/// use ragdoc_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".ragdoc.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), ragdoc_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add `RAGDOC_*` environment variable overlay
    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    /// Override every field with `config`
    pub fn with_config(self, config: Config) -> Self {
        self.with_overrides(config.into())
    }

    /// Override only the fields `overrides` sets
    pub fn with_overrides(mut self, overrides: PartialConfig) -> Self {
        self.sources.push(ConfigSource::Explicit(overrides));
        self
    }

    /// Merge all sources in order and validate the result
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    let layer = file::load_layer_from_file(&path)?;
                    tracing::debug!("loaded configuration from {}", path.display());
                    config = merge::merge(config, layer);
                }
                ConfigSource::Environment => {
                    if let Some(layer) = env::from_env()? {
                        config = merge::merge(config, layer);
                    }
                }
                ConfigSource::Explicit(overrides) => {
                    config = merge::merge(config, overrides);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Files probed by [`Config::load`], first match wins
pub const DEFAULT_CONFIG_FILES: [&str; 4] =
    [".ragdoc.toml", ".ragdoc.yml", ".ragdoc.yaml", ".ragdoc.json"];

impl Config {
    /// Load configuration from the default locations in the working
    /// directory, then apply the environment overlay.
    ///
    /// Falls back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let mut builder = ConfigBuilder::new();

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .find(|path| Path::new(path).exists())
        {
            builder = builder.with_file(path);
        }

        builder.with_env().build()
    }

    /// Load configuration from a specific file plus the environment overlay
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}
