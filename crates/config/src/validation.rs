//! Validation trait and helpers for configuration types

use crate::error::{ConfigError, Result};

/// Trait for validating configuration values
///
/// Implement this for any config type that needs checks beyond what the
/// type system enforces. Returns a `ConfigError` naming the offending field.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Validate that an integer lies within `min..=max`
pub fn validate_range(
    field: impl Into<String>,
    value: usize,
    min: usize,
    max: usize,
) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate that an integer is strictly above `min`
pub fn validate_positive(field: impl Into<String>, value: usize, min: usize) -> Result<()> {
    if value <= min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}

/// Validate an optional base URL override
pub fn validate_api_base(field: &str, api_base: Option<&str>) -> Result<()> {
    let Some(api_base) = api_base else {
        return Ok(());
    };

    if api_base.is_empty() {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: "API base URL cannot be empty string (use null to unset)".to_string(),
        });
    }

    if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!(
                "API base must start with http:// or https://, got: {}",
                api_base
            ),
        });
    }

    Ok(())
}
