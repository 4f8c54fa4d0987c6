use anyhow::{bail, Result};
use ragdoc_config::RetrievalConfig;
use ragdoc_core::llm;
use ragdoc_core::traits::{ChatModel, Embedder};
use ragdoc_index::{ScoredChunk, VectorStore};
use std::sync::Arc;

/// A generated answer and the chunks it was grounded on.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub contexts: Vec<ScoredChunk>,
}

pub struct ChatService {
    retrieval: RetrievalConfig,
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatModel>,
    store: Arc<dyn VectorStore>,
}

impl ChatService {
    pub fn new(
        retrieval: RetrievalConfig,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatModel>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            retrieval,
            embedder,
            chat,
            store,
        }
    }

    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredChunk>> {
        let embedding = self.embedder.embed(question).await?;
        self.store.query(&embedding, self.retrieval.top_k).await
    }

    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            bail!("question must not be empty");
        }

        let contexts = self.retrieve(question).await?;
        tracing::debug!(retrieved = contexts.len(), "retrieved context");

        let texts: Vec<String> = contexts.iter().map(|c| c.chunk.text.clone()).collect();
        let text = llm::answer_with_context(
            self.chat.as_ref(),
            question,
            &texts,
            &self.retrieval.context_separator,
        )
        .await?;

        Ok(Answer { text, contexts })
    }
}
