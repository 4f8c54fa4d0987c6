use crate::models::Message;
use crate::prompts;
use crate::traits::ChatModel;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ragdoc_config::LlmConfig;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

/// Chat completions against an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiChat {
    model: String,
    api_key: String,
    api_base: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiChat {
    pub fn new(
        model: String,
        api_key: String,
        api_base: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            model,
            api_key,
            api_base,
            max_tokens,
            client,
        })
    }

    /// Build from config, reading the key from `OPENAI_API_KEY`.
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY not set; cannot call OpenAI"))?;
        let api_base = cfg
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE.to_string());
        Self::new(
            cfg.model.clone(),
            api_key,
            api_base,
            cfg.max_tokens,
            cfg.timeout_secs,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, messages: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

fn first_content(parsed: ChatResponse) -> Result<String> {
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        Err(anyhow!("Empty response from OpenAI"))
    } else {
        Ok(content)
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await
            .context("OpenAI request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI error ({}): {}", status, body));
        }

        let parsed: ChatResponse = resp.json().await?;
        first_content(parsed)
    }
}

/// Summarize a document.
pub async fn summarize(model: &dyn ChatModel, text: &str) -> Result<String> {
    model.chat(&prompts::summary_messages(text)).await
}

/// Answer `question` using only the retrieved `contexts`.
pub async fn answer_with_context(
    model: &dyn ChatModel,
    question: &str,
    contexts: &[String],
    separator: &str,
) -> Result<String> {
    model
        .chat(&prompts::answer_messages(question, contexts, separator))
        .await
}
