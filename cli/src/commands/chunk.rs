use anyhow::Result;
use console::Style;
use ragdoc_config::Config;
use ragdoc_core::chunking::TokenCodec;
use ragdoc_core::document::read_document;
use ragdoc_core::TokenChunker;
use std::path::Path;

use super::ui;

pub fn handle_chunk(
    file: &Path,
    size: Option<usize>,
    overlap: Option<usize>,
    json: bool,
    mut config: Config,
) -> Result<()> {
    if let Some(size) = size {
        config.chunking.chunk_size = size;
    }
    if let Some(overlap) = overlap {
        config.chunking.chunk_overlap = overlap;
    }

    let chunker = TokenChunker::from_config(&config)?;
    let text = read_document(file)?;
    let chunks = chunker.chunk_with_spans(&text);

    if json {
        let items: Vec<_> = chunks
            .iter()
            .map(|c| {
                serde_json::json!({
                    "index": c.index,
                    "start_token": c.span.start,
                    "end_token": c.span.end,
                    "text": c.text,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    ui::print_header(&format!("Chunks of {}", file.display()));
    ui::print_key_value("tokenizer", chunker.codec().model());
    ui::print_key_value("tokens", &chunker.codec().count_tokens(&text).to_string());
    ui::print_key_value(
        "chunk size / overlap",
        &format!("{} / {}", chunker.params().chunk_size(), chunker.params().overlap()),
    );
    ui::print_key_value("chunks", &chunks.len().to_string());
    println!();

    for chunk in &chunks {
        let title = format!("#{} tokens {}-{}", chunk.index, chunk.span.start, chunk.span.end);
        ui::print_panel(&title, &chunk.text, Style::new().cyan(), None);
    }
    Ok(())
}
