use crate::traits::Embedder;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ragdoc_config::{EmbeddingBackend, EmbeddingConfig};
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::sync::Arc;

/// Build the embedder selected in configuration.
pub fn select_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    match config.backend {
        EmbeddingBackend::OpenAi => {
            let api_key = env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set for the openai embedding backend")?;
            let api_base = config
                .api_base
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
            Ok(Arc::new(OpenAiEmbedder::new(
                config.model_name.clone(),
                api_key,
                api_base,
            )))
        }
        EmbeddingBackend::Ollama => {
            let base_url = config
                .api_base
                .clone()
                .or_else(|| env::var("OLLAMA_BASE_URL").ok())
                .unwrap_or_else(|| "http://localhost:11434".to_string());
            Ok(Arc::new(OllamaEmbedder::new(config.model_name.clone(), base_url)))
        }
    }
}

pub struct OpenAiEmbedder {
    model: String,
    api_key: String,
    api_base: String,
    client: Client,
}

impl OpenAiEmbedder {
    pub fn new(model: String, api_key: String, api_base: String) -> Self {
        Self {
            model,
            api_key,
            api_base,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

/// Restore request order; the API tags each vector with its input index.
fn ordered_embeddings(parsed: OpenAiEmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    if parsed.data.len() != expected {
        return Err(anyhow!(
            "Mismatch embedding count: got {}, expected {}",
            parsed.data.len(),
            expected
        ));
    }
    let mut items = parsed.data;
    items.sort_by_key(|item| item.index);
    Ok(items.into_iter().map(|item| item.embedding).collect())
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut list = self.embed_batch(&[text.to_string()]).await?;
        list.pop().ok_or_else(|| anyhow!("Empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self
            .client
            .post(format!("{}/embeddings", self.api_base.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "input": texts,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI embeddings failed ({}): {}", status, body));
        }

        let parsed: OpenAiEmbeddingResponse = resp.json().await?;
        ordered_embeddings(parsed, texts.len())
    }
}

pub struct OllamaEmbedder {
    model: String,
    base_url: String,
    client: Client,
}

impl OllamaEmbedder {
    pub fn new(model: String, base_url: String) -> Self {
        Self {
            model,
            base_url,
            client: Client::new(),
        }
    }
}

fn parse_ollama_embedding(json: &serde_json::Value) -> Result<Vec<f32>> {
    Ok(json["embedding"]
        .as_array()
        .ok_or_else(|| anyhow!("No embedding field in Ollama response"))?
        .iter()
        .filter_map(|v| v.as_f64())
        .map(|f| f as f32)
        .collect())
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let resp = self
            .client
            .post(format!(
                "{}/api/embeddings",
                self.base_url.trim_end_matches('/')
            ))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": text,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Ollama embeddings failed ({}): {}", status, body));
        }

        let json: serde_json::Value = resp.json().await?;
        parse_ollama_embedding(&json)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_response_reordered() {
        let parsed: OpenAiEmbeddingResponse = serde_json::from_str(
            r#"{"data":[
                {"index":1,"embedding":[0.0,1.0]},
                {"index":0,"embedding":[1.0,0.0]}
            ]}"#,
        )
        .unwrap();
        let vectors = ordered_embeddings(parsed, 2).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_openai_count_mismatch() {
        let parsed: OpenAiEmbeddingResponse =
            serde_json::from_str(r#"{"data":[{"index":0,"embedding":[1.0]}]}"#).unwrap();
        assert!(ordered_embeddings(parsed, 2).is_err());
    }

    #[test]
    fn test_parse_ollama() {
        let json = serde_json::json!({ "embedding": [0.5, 0.25] });
        assert_eq!(parse_ollama_embedding(&json).unwrap(), vec![0.5, 0.25]);
        assert!(parse_ollama_embedding(&serde_json::json!({})).is_err());
    }

    #[test]
    fn test_select_ollama_needs_no_key() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Ollama,
            model_name: "nomic-embed-text".to_string(),
            ..Default::default()
        };
        assert!(select_embedder(&config).is_ok());
    }
}
