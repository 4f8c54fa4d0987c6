//! Configuration merging logic
//!
//! Applies sparse layers onto a complete configuration in precedence order.

use super::partial::*;
use crate::{types::*, Config};

/// Apply `overlay` on top of `base`. Every field the overlay sets wins,
/// including values equal to the defaults.
pub fn merge(base: Config, overlay: PartialConfig) -> Config {
    Config {
        chunking: merge_chunking(base.chunking, overlay.chunking),
        embedding: merge_embedding(base.embedding, overlay.embedding),
        llm: merge_llm(base.llm, overlay.llm),
        retrieval: merge_retrieval(base.retrieval, overlay.retrieval),
        summary: merge_summary(base.summary, overlay.summary),
    }
}

fn merge_chunking(base: ChunkingConfig, overlay: PartialChunkingConfig) -> ChunkingConfig {
    ChunkingConfig {
        chunk_size: overlay.chunk_size.unwrap_or(base.chunk_size),
        chunk_overlap: overlay.chunk_overlap.unwrap_or(base.chunk_overlap),
        tokenizer_model: overlay.tokenizer_model.or(base.tokenizer_model),
    }
}

fn merge_embedding(base: EmbeddingConfig, overlay: PartialEmbeddingConfig) -> EmbeddingConfig {
    EmbeddingConfig {
        backend: overlay.backend.unwrap_or(base.backend),
        model_name: overlay.model_name.unwrap_or(base.model_name),
        batch_size: overlay.batch_size.unwrap_or(base.batch_size),
        api_base: overlay.api_base.or(base.api_base),
    }
}

fn merge_llm(base: LlmConfig, overlay: PartialLlmConfig) -> LlmConfig {
    LlmConfig {
        model: overlay.model.unwrap_or(base.model),
        max_tokens: overlay.max_tokens.unwrap_or(base.max_tokens),
        timeout_secs: overlay.timeout_secs.unwrap_or(base.timeout_secs),
        api_base: overlay.api_base.or(base.api_base),
    }
}

fn merge_retrieval(base: RetrievalConfig, overlay: PartialRetrievalConfig) -> RetrievalConfig {
    RetrievalConfig {
        top_k: overlay.top_k.unwrap_or(base.top_k),
        collection: overlay.collection.unwrap_or(base.collection),
        context_separator: overlay.context_separator.unwrap_or(base.context_separator),
    }
}

fn merge_summary(base: SummaryConfig, overlay: PartialSummaryConfig) -> SummaryConfig {
    SummaryConfig {
        enabled: overlay.enabled.unwrap_or(base.enabled),
        max_input_tokens: overlay.max_input_tokens.unwrap_or(base.max_input_tokens),
    }
}
