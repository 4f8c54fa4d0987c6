pub mod chunking;
pub mod document;
pub mod embeddings;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod traits;

pub use chunking::{chunk_text, ChunkParams, TextChunk, TokenChunker};
pub use error::{ChunkError, DocumentError};
