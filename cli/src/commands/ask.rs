use anyhow::Result;
use ragdoc_config::Config;
use std::path::Path;

use super::ui;
use super::utils::Session;

pub async fn handle_ask(
    file: &Path,
    question: &str,
    show_context: bool,
    config: &Config,
) -> Result<()> {
    let session = Session::open(file, config).await?;
    session.print_summary();

    ui::print_header(&format!("Question: {}", question));
    session.answer(question, show_context).await
}
