//! Configuration management for ragdoc
//!
//! Provides a validated, layered configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Validation with helpful error messages
//! - Merging (defaults + file + environment + explicit overrides)
//!
//! # Example
//!
//! ```no_run
//! use ragdoc_config::Config;
//!
//! // Load from default location (.ragdoc.{toml,yml,yaml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! let chunk_size = config.chunking.chunk_size;
//! # Ok::<(), ragdoc_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{ConfigBuilder, PartialConfig};
pub use types::*;
pub use validation::Validate;
