//! Retrieval configuration

use serde::{Deserialize, Serialize};

/// How many chunks are retrieved per question and how they are presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks handed to the LLM as context
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Name of the vector collection documents are indexed into
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Separator placed between retrieved chunks in the prompt
    #[serde(default = "default_context_separator")]
    pub context_separator: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            collection: default_collection(),
            context_separator: default_context_separator(),
        }
    }
}

impl crate::validation::Validate for RetrievalConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        crate::validation::validate_range("retrieval.top_k", self.top_k, 1, 100)?;

        if self.collection.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "retrieval.collection".to_string(),
                message: "Collection name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn default_top_k() -> usize {
    3
}

fn default_collection() -> String {
    "documents".to_string()
}

fn default_context_separator() -> String {
    "\n\n---\n\n".to_string()
}
