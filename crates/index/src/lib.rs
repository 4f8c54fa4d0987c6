//! In-memory vector index over embedded document chunks.

pub mod vector;

pub use vector::{
    cosine_similarity, ChunkRecord, InMemoryVectorStore, IndexError, ScoredChunk, VectorStore,
};
