//! Configuration type definitions
//!
//! Each section is self-contained with validation and defaults.

pub mod chunking;
pub mod embedding;
pub mod llm;
pub mod retrieval;
pub mod summary;

pub use chunking::ChunkingConfig;
pub use embedding::{EmbeddingBackend, EmbeddingConfig};
pub use llm::LlmConfig;
pub use retrieval::RetrievalConfig;
pub use summary::SummaryConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration, organized by pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub summary: SummaryConfig,
}

impl Config {
    /// Tokenizer model for chunking, defaulting to the generation model
    pub fn tokenizer_model(&self) -> &str {
        self.chunking.resolve_tokenizer_model(&self.llm.model)
    }
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.chunking.validate()?;
        self.embedding.validate()?;
        self.llm.validate()?;
        self.retrieval.validate()?;
        self.summary.validate()?;

        Ok(())
    }
}
