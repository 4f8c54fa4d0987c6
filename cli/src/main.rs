mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{handle_ask, handle_chat, handle_chunk, handle_summarize, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chunk {
            file,
            size,
            overlap,
            json,
        } => {
            handle_chunk(&file, size, overlap, json, config)?;
        }
        Commands::Summarize { file } => {
            handle_summarize(&file, &config).await?;
        }
        Commands::Ask {
            file,
            question,
            show_context,
        } => {
            handle_ask(&file, &question, show_context, &config).await?;
        }
        Commands::Chat { file, show_context } => {
            handle_chat(&file, show_context, &config).await?;
        }
    }

    Ok(())
}
