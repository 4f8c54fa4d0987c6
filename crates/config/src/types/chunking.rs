//! Document chunking configuration

use serde::{Deserialize, Serialize};

/// Configuration for token-based document chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Trailing tokens of one chunk repeated at the start of the next
    ///
    /// Must be strictly less than `chunk_size`.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Model whose tokenizer measures chunk sizes
    ///
    /// When unset, the LLM model is used so token counts match what the
    /// generation service will consume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer_model: Option<String>,
}

impl ChunkingConfig {
    /// Tokenizer model to use, falling back to the generation model
    pub fn resolve_tokenizer_model<'a>(&'a self, llm_model: &'a str) -> &'a str {
        self.tokenizer_model.as_deref().unwrap_or(llm_model)
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            tokenizer_model: None,
        }
    }
}

impl crate::validation::Validate for ChunkingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("chunking.chunk_size", self.chunk_size, 0)?;

        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::ValidationError {
                field: "chunking.chunk_overlap".to_string(),
                message: format!(
                    "chunk_overlap ({}) must be < chunk_size ({})",
                    self.chunk_overlap, self.chunk_size
                ),
            });
        }

        if matches!(self.tokenizer_model.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError {
                field: "chunking.tokenizer_model".to_string(),
                message: "Tokenizer model cannot be empty (omit it to use llm.model)".to_string(),
            });
        }

        Ok(())
    }
}

fn default_chunk_size() -> usize {
    100
}

fn default_chunk_overlap() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = ChunkingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.chunk_overlap, 10);
    }

    #[test]
    fn test_zero_chunk_size_invalid() {
        let config = ChunkingConfig {
            chunk_size: 0,
            chunk_overlap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlap_equal_to_size_invalid() {
        let config = ChunkingConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tokenizer_model_fallback() {
        let mut config = ChunkingConfig::default();
        assert_eq!(config.resolve_tokenizer_model("gpt-4"), "gpt-4");
        config.tokenizer_model = Some("gpt-3.5-turbo".to_string());
        assert_eq!(config.resolve_tokenizer_model("gpt-4"), "gpt-3.5-turbo");
    }
}
