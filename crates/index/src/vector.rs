use anyhow::Result;
use async_trait::async_trait;
use ragdoc_core::models::DocumentChunk;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq)]
pub enum IndexError {
    #[error("duplicate chunk id '{0}'")]
    DuplicateId(String),

    #[error("embedding for '{id}' has dimension {got}, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        got: usize,
    },

    #[error("query embedding has dimension {got}, expected {expected}")]
    QueryDimension { expected: usize, got: usize },
}

/// A chunk and its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub chunk: DocumentChunk,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert records, returning how many were added. Either every record is
    /// stored or none is.
    async fn add(&self, records: Vec<ChunkRecord>) -> Result<usize>;

    /// The `top_k` most similar chunks, best first.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn clear(&self);
}

/// Cosine similarity; zero when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[derive(Default)]
struct Inner {
    records: Vec<ChunkRecord>,
    ids: HashSet<String>,
    dimension: Option<usize>,
}

impl Inner {
    fn check(&self, records: &[ChunkRecord]) -> Result<(), IndexError> {
        let mut dimension = self.dimension;
        let mut batch_ids = HashSet::new();
        for record in records {
            let id = &record.chunk.id;
            if self.ids.contains(id) || !batch_ids.insert(id.as_str()) {
                return Err(IndexError::DuplicateId(id.clone()));
            }
            let got = record.embedding.len();
            match dimension {
                Some(expected) if expected != got => {
                    return Err(IndexError::DimensionMismatch {
                        id: id.clone(),
                        expected,
                        got,
                    });
                }
                Some(_) => {}
                None => dimension = Some(got),
            }
        }
        Ok(())
    }
}

/// Vector store held in process memory with brute-force search.
pub struct InMemoryVectorStore {
    collection: String,
    inner: RwLock<Inner>,
}

impl InMemoryVectorStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, records: Vec<ChunkRecord>) -> Result<usize> {
        let mut inner = self.inner.write().await;
        inner.check(&records)?;

        let count = records.len();
        for record in records {
            inner.dimension.get_or_insert(record.embedding.len());
            inner.ids.insert(record.chunk.id.clone());
            inner.records.push(record);
        }
        tracing::debug!(
            collection = %self.collection,
            added = count,
            total = inner.records.len(),
            "added chunks"
        );
        Ok(count)
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>> {
        let inner = self.inner.read().await;
        let Some(expected) = inner.dimension else {
            return Ok(Vec::new());
        };
        if embedding.len() != expected {
            return Err(IndexError::QueryDimension {
                expected,
                got: embedding.len(),
            }
            .into());
        }

        let mut scored: Vec<(usize, f32)> = inner
            .records
            .iter()
            .enumerate()
            .map(|(pos, r)| (pos, cosine_similarity(embedding, &r.embedding)))
            .collect();
        // stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(pos, score)| ScoredChunk {
                chunk: inner.records[pos].chunk.clone(),
                score,
            })
            .collect())
    }

    async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    async fn clear(&self) {
        let mut inner = self.inner.write().await;
        *inner = Inner::default();
    }
}
