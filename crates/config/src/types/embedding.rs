//! Embedding provider configuration

use serde::{Deserialize, Serialize};

/// Embedding provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Model name for the selected backend
    ///
    /// Examples:
    /// - OpenAI: "text-embedding-3-small", "text-embedding-3-large"
    /// - Ollama: "nomic-embed-text", "mxbai-embed-large"
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Number of chunks sent per embedding request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Optional API base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Embedding backend options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// OpenAI API (requires OPENAI_API_KEY)
    #[default]
    #[serde(rename = "openai")]
    OpenAi,

    /// Local Ollama server
    Ollama,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model_name: default_model_name(),
            batch_size: default_batch_size(),
            api_base: None,
        }
    }
}

impl crate::validation::Validate for EmbeddingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_api_base, validate_range};

        if self.model_name.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "embedding.model_name".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        validate_range("embedding.batch_size", self.batch_size, 1, 2048)?;
        validate_api_base("embedding.api_base", self.api_base.as_deref())?;

        if self.backend == EmbeddingBackend::OpenAi && std::env::var("OPENAI_API_KEY").is_err() {
            tracing::warn!("embedding.backend is 'openai' but OPENAI_API_KEY is not set");
        }

        Ok(())
    }
}

fn default_model_name() -> String {
    "text-embedding-3-small".to_string()
}

fn default_batch_size() -> usize {
    64
}
