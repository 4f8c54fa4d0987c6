#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use ragdoc_config::Config;
use ragdoc_core::models::{Message, Role};
use ragdoc_core::traits::{ChatModel, Embedder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const TOPICS: [&str; 4] = ["cat", "rust", "ocean", "bread"];

/// Embeds text as keyword counts over a small topic vocabulary.
#[derive(Default)]
pub struct KeywordEmbedder {
    pub batch_sizes: Mutex<Vec<usize>>,
    pub single_calls: AtomicUsize,
}

impl KeywordEmbedder {
    fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        TOPICS
            .iter()
            .map(|t| lower.matches(t).count() as f32)
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.batch_sizes.lock().unwrap().len() + self.single_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_sizes.lock().unwrap().push(texts.len());
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

/// Replies with a canned answer and records every prompt.
pub struct ScriptedChat {
    pub reply: String,
    pub prompts: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedChat {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_user_prompt(&self) -> String {
        let prompts = self.prompts.lock().unwrap();
        prompts
            .last()
            .and_then(|m| m.iter().find(|m| m.role == Role::User))
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        self.prompts.lock().unwrap().push(messages.to_vec());
        Ok(self.reply.clone())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.llm.model = "gpt-3.5-turbo".to_string();
    config
}
