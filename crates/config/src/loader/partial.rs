//! Sparse configuration layers
//!
//! Every field is optional: `Some` means the layer set it, `None` means the
//! value comes from an earlier layer or the defaults.

use crate::types::*;
use crate::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialChunkingConfig {
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
    pub tokenizer_model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialEmbeddingConfig {
    pub backend: Option<EmbeddingBackend>,
    pub model_name: Option<String>,
    pub batch_size: Option<usize>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialLlmConfig {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialRetrievalConfig {
    pub top_k: Option<usize>,
    pub collection: Option<String>,
    pub context_separator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialSummaryConfig {
    pub enabled: Option<bool>,
    pub max_input_tokens: Option<usize>,
}

/// One configuration layer: a file, the environment, or explicit overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub chunking: PartialChunkingConfig,
    pub embedding: PartialEmbeddingConfig,
    pub llm: PartialLlmConfig,
    pub retrieval: PartialRetrievalConfig,
    pub summary: PartialSummaryConfig,
}

impl PartialConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A complete config as a layer that sets every field.
impl From<Config> for PartialConfig {
    fn from(config: Config) -> Self {
        Self {
            chunking: PartialChunkingConfig {
                chunk_size: Some(config.chunking.chunk_size),
                chunk_overlap: Some(config.chunking.chunk_overlap),
                tokenizer_model: config.chunking.tokenizer_model,
            },
            embedding: PartialEmbeddingConfig {
                backend: Some(config.embedding.backend),
                model_name: Some(config.embedding.model_name),
                batch_size: Some(config.embedding.batch_size),
                api_base: config.embedding.api_base,
            },
            llm: PartialLlmConfig {
                model: Some(config.llm.model),
                max_tokens: Some(config.llm.max_tokens),
                timeout_secs: Some(config.llm.timeout_secs),
                api_base: config.llm.api_base,
            },
            retrieval: PartialRetrievalConfig {
                top_k: Some(config.retrieval.top_k),
                collection: Some(config.retrieval.collection),
                context_separator: Some(config.retrieval.context_separator),
            },
            summary: PartialSummaryConfig {
                enabled: Some(config.summary.enabled),
                max_input_tokens: Some(config.summary.max_input_tokens),
            },
        }
    }
}
