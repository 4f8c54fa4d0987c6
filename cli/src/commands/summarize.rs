use anyhow::Result;
use ragdoc_config::Config;
use ragdoc_core::chunking::{TokenCodec, Tokenizer};
use ragdoc_core::document::read_document;
use ragdoc_core::llm::{self, OpenAiChat};
use std::path::Path;

use super::ui;
use super::utils::render_markdown_answer;

pub async fn handle_summarize(file: &Path, config: &Config) -> Result<()> {
    let text = read_document(file)?;
    let tokenizer = Tokenizer::for_model(config.tokenizer_model())?;
    let excerpt = tokenizer.truncate(&text, config.summary.max_input_tokens);
    let model = OpenAiChat::from_config(&config.llm)?;

    let spinner = ui::spinner(&format!("Summarizing {}...", file.display()));
    let summary = llm::summarize(&model, &excerpt).await;
    spinner.finish_and_clear();

    ui::print_header("Summary");
    println!("{}", render_markdown_answer(&summary?));
    Ok(())
}
