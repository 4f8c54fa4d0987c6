pub mod ask;
pub mod chat;
pub mod chunk;
pub mod summarize;
pub mod ui;
pub mod utils;

pub use ask::handle_ask;
pub use chat::handle_chat;
pub use chunk::handle_chunk;
pub use summarize::handle_summarize;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ragdoc_config::Config;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ragdoc")]
#[command(about = "Summarize documents and answer questions about them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a document into token-bounded chunks (no network access)
    Chunk {
        file: PathBuf,

        /// Tokens per chunk
        #[arg(long)]
        size: Option<usize>,

        /// Tokens shared between consecutive chunks
        #[arg(long)]
        overlap: Option<usize>,

        /// Print chunks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize a document
    Summarize { file: PathBuf },
    /// Ingest a document and answer one question about it
    Ask {
        file: PathBuf,
        question: String,

        /// Print the retrieved chunks
        #[arg(long)]
        show_context: bool,
    },
    /// Ingest a document, then answer questions read from stdin
    Chat {
        file: PathBuf,

        #[arg(long)]
        show_context: bool,
    },
}

/// `--config` replaces file discovery; environment overrides apply either way.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    tracing::info!(
        llm = %config.llm.model,
        tokenizer = %config.tokenizer_model(),
        chunk_size = config.chunking.chunk_size,
        overlap = config.chunking.chunk_overlap,
        "loaded configuration"
    );
    Ok(config)
}
