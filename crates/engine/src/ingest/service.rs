use super::pipeline::{document_id, embed_in_batches};
use anyhow::{anyhow, Result};
use ragdoc_config::Config;
use ragdoc_core::chunking::{TokenChunker, TokenCodec};
use ragdoc_core::document::read_document;
use ragdoc_core::llm;
use ragdoc_core::models::DocumentChunk;
use ragdoc_core::traits::{ChatModel, Embedder};
use ragdoc_index::{ChunkRecord, VectorStore};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Outcome of ingesting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub doc_id: String,
    pub chunk_count: usize,
    pub token_count: usize,
    pub summary: Option<String>,
}

pub struct IngestService {
    config: Config,
    chunker: TokenChunker,
    embedder: Arc<dyn Embedder>,
    chat: Option<Arc<dyn ChatModel>>,
    store: Arc<dyn VectorStore>,
}

impl IngestService {
    /// Fails if the chunking configuration or tokenizer model is invalid.
    pub fn new(
        config: &Config,
        embedder: Arc<dyn Embedder>,
        chat: Option<Arc<dyn ChatModel>>,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self> {
        let chunker = TokenChunker::from_config(config)?;
        Ok(Self {
            config: config.clone(),
            chunker,
            embedder,
            chat,
            store,
        })
    }

    pub fn chunker(&self) -> &TokenChunker {
        &self.chunker
    }

    pub async fn ingest_file(&self, path: &Path, summarize: bool) -> Result<IngestReport> {
        let text = read_document(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.ingest_text(&name, &text, summarize).await
    }

    pub async fn ingest_text(
        &self,
        name: &str,
        text: &str,
        summarize: bool,
    ) -> Result<IngestReport> {
        let doc_id = document_id(text);
        let tokenizer = self.chunker.codec();
        let tokens = if text.is_empty() {
            Vec::new()
        } else {
            tokenizer.encode(text)
        };
        let token_count = tokens.len();

        let summary = if summarize && !text.is_empty() {
            let chat = self
                .chat
                .as_ref()
                .ok_or_else(|| anyhow!("summarization requested but no chat model is configured"))?;
            let limit = self.config.summary.max_input_tokens;
            let excerpt = if token_count <= limit {
                text.to_string()
            } else {
                tokenizer.decode(&tokens[..limit])
            };
            Some(llm::summarize(chat.as_ref(), &excerpt).await?)
        } else {
            None
        };

        let chunks: Vec<DocumentChunk> = self
            .chunker
            .chunk_tokens(&tokens)
            .into_iter()
            .map(|c| DocumentChunk {
                id: DocumentChunk::chunk_id(&doc_id, c.index),
                doc_id: doc_id.clone(),
                index: c.index,
                start_token: c.span.start,
                end_token: c.span.end,
                text: c.text,
            })
            .collect();

        let chunk_count = if chunks.is_empty() {
            0
        } else {
            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
            let embeddings = embed_in_batches(
                self.embedder.as_ref(),
                &texts,
                self.config.embedding.batch_size,
            )
            .await?;

            let records = chunks
                .into_iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| ChunkRecord { chunk, embedding })
                .collect();
            self.store.add(records).await?
        };

        info!(
            document = name,
            doc_id = %doc_id,
            tokens = token_count,
            chunks = chunk_count,
            "ingested document"
        );

        Ok(IngestReport {
            doc_id,
            chunk_count,
            token_count,
            summary,
        })
    }
}
