use anyhow::Result;
use console::Style;
use ragdoc_config::Config;
use ragdoc_core::embeddings::select_embedder;
use ragdoc_core::llm::OpenAiChat;
use ragdoc_core::traits::ChatModel;
use ragdoc_engine::{ChatService, IngestReport, IngestService};
use ragdoc_index::{InMemoryVectorStore, ScoredChunk};
use std::path::Path;
use std::sync::Arc;
use termimad::{FmtText, MadSkin};

use super::ui;

pub fn render_markdown_answer(text: &str) -> String {
    let skin = MadSkin::default();
    let (w, _) = termimad::terminal_size();
    let width = std::cmp::max(20, w.saturating_sub(4) as usize);
    FmtText::from(&skin, text, Some(width)).to_string()
}

/// Ingestion and question answering over a shared, in-memory index.
pub struct Session {
    pub chat: ChatService,
    pub report: IngestReport,
}

impl Session {
    /// Ingest `file` and get ready to answer questions about it.
    pub async fn open(file: &Path, config: &Config) -> Result<Self> {
        let embedder = select_embedder(&config.embedding)?;
        let model: Arc<dyn ChatModel> = Arc::new(OpenAiChat::from_config(&config.llm)?);
        let store = Arc::new(InMemoryVectorStore::new(config.retrieval.collection.clone()));

        let ingest = IngestService::new(
            config,
            embedder.clone(),
            Some(model.clone()),
            store.clone(),
        )?;

        let spinner = ui::spinner(&format!("Processing {}...", file.display()));
        let report = ingest.ingest_file(file, config.summary.enabled).await;
        spinner.finish_and_clear();
        let report = report?;

        ui::print_success(&format!(
            "Indexed {} chunks ({} tokens)",
            report.chunk_count, report.token_count
        ));

        let chat = ChatService::new(config.retrieval.clone(), embedder, model, store);
        Ok(Self { chat, report })
    }

    pub fn print_summary(&self) {
        if let Some(summary) = &self.report.summary {
            ui::print_header("Summary");
            println!("{}", render_markdown_answer(summary));
        }
    }

    pub async fn answer(&self, question: &str, show_context: bool) -> Result<()> {
        let spinner = ui::spinner("Generating answer...");
        let answer = self.chat.ask(question).await;
        spinner.finish_and_clear();
        let answer = answer?;

        if show_context {
            print_contexts(&answer.contexts);
        }
        ui::print_header("Answer");
        println!("{}", render_markdown_answer(&answer.text));
        Ok(())
    }
}

pub fn print_contexts(contexts: &[ScoredChunk]) {
    for (i, scored) in contexts.iter().enumerate() {
        let title = format!(
            "Context {} (score {:.3}, tokens {}-{})",
            i + 1,
            scored.score,
            scored.chunk.start_token,
            scored.chunk.end_token
        );
        ui::print_panel(&title, &scored.chunk.text, Style::new().blue(), Some(Style::new().dim()));
    }
}
