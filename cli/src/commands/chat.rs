use anyhow::Result;
use console::Style;
use ragdoc_config::Config;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::ui;
use super::utils::Session;

pub async fn handle_chat(file: &Path, show_context: bool, config: &Config) -> Result<()> {
    let session = Session::open(file, config).await?;
    session.print_summary();

    println!(
        "\n{}",
        Style::new()
            .dim()
            .apply_to("Ask a question about the document (type 'exit' to quit).")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", Style::new().bold().green().apply_to(">"));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        if let Err(e) = session.answer(question, show_context).await {
            ui::print_error(&format!("{:#}", e));
        }
    }
    Ok(())
}
