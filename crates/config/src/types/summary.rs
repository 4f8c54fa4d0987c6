//! Document summary configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Summarize documents at ingestion time
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Documents are cut to this many tokens before being sent for summary
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_input_tokens: default_max_input_tokens(),
        }
    }
}

impl crate::validation::Validate for SummaryConfig {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_positive("summary.max_input_tokens", self.max_input_tokens, 0)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_input_tokens() -> usize {
    12_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        assert!(SummaryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_input_tokens_invalid() {
        let config = SummaryConfig {
            max_input_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
