use std::path::PathBuf;
use thiserror::Error;

/// Failures of the token chunker. Both variants are raised before any
/// chunk is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// `chunk_size` is zero or `overlap` is outside `[0, chunk_size)`
    #[error("invalid chunking configuration (chunk_size={chunk_size}, overlap={overlap}): {reason}")]
    InvalidConfiguration {
        chunk_size: usize,
        overlap: usize,
        reason: String,
    },

    /// No tokenizer could be resolved for the requested model
    #[error("tokenizer configuration error: {0}")]
    Configuration(String),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported document format: {}", path.display())]
    Unsupported { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Encoding { path: PathBuf },
}
