use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message sent to the language model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chunk of an ingested document, ready to be embedded and indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentChunk {
    /// Unique across documents: `{doc_id}-chunk_{index}`
    pub id: String,
    pub doc_id: String,
    pub index: usize,
    pub start_token: usize,
    pub end_token: usize,
    pub text: String,
}

impl DocumentChunk {
    pub fn chunk_id(doc_id: &str, index: usize) -> String {
        format!("{}-chunk_{}", doc_id, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_like_openai() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "user", "content": "hi" }));
    }

    #[test]
    fn test_chunk_id() {
        assert_eq!(DocumentChunk::chunk_id("3f2a", 7), "3f2a-chunk_7");
    }
}
