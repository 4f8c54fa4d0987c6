use crate::error::ChunkError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tiktoken_rs::CoreBPE;

/// Loaded vocabularies, keyed by model name.
static BPE_CACHE: Lazy<Mutex<HashMap<String, Arc<CoreBPE>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Converts between text and model token ids.
///
/// Implementations must be deterministic: the same text always encodes to
/// the same ids, and `decode` never fails (ranges that split a multi-byte
/// character decode lossily).
pub trait TokenCodec: Send + Sync {
    fn encode(&self, text: &str) -> Vec<usize>;

    fn decode(&self, tokens: &[usize]) -> String;

    fn count_tokens(&self, text: &str) -> usize {
        self.encode(text).len()
    }

    /// Keep at most the first `max_tokens` tokens of `text`.
    fn truncate(&self, text: &str, max_tokens: usize) -> String {
        let tokens = self.encode(text);
        if tokens.len() <= max_tokens {
            text.to_string()
        } else {
            self.decode(&tokens[..max_tokens])
        }
    }
}

impl<C: TokenCodec + ?Sized> TokenCodec for &C {
    fn encode(&self, text: &str) -> Vec<usize> {
        (**self).encode(text)
    }

    fn decode(&self, tokens: &[usize]) -> String {
        (**self).decode(tokens)
    }
}

/// BPE tokenizer matching an OpenAI model's vocabulary.
#[derive(Clone)]
pub struct Tokenizer {
    model: String,
    bpe: Arc<CoreBPE>,
}

impl Tokenizer {
    /// Resolve the tokenizer used by `model` (e.g. "gpt-4o-mini", "gpt-3.5-turbo").
    pub fn for_model(model: &str) -> Result<Self, ChunkError> {
        let mut cache = BPE_CACHE
            .lock()
            .map_err(|_| ChunkError::Configuration("tokenizer cache poisoned".to_string()))?;
        let bpe = match cache.get(model) {
            Some(bpe) => bpe.clone(),
            None => {
                let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
                    ChunkError::Configuration(format!("no tokenizer for model '{}': {}", model, e))
                })?;
                tracing::debug!("loaded tokenizer for model {}", model);
                let bpe = Arc::new(bpe);
                cache.insert(model.to_string(), bpe.clone());
                bpe
            }
        };
        Ok(Self {
            model: model.to_string(),
            bpe,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl TokenCodec for Tokenizer {
    // Special-token markup inside a document is treated as plain text.
    fn encode(&self, text: &str) -> Vec<usize> {
        self.bpe.encode_ordinary(text)
    }

    fn decode(&self, tokens: &[usize]) -> String {
        let bytes: Vec<u8> = self
            .bpe
            ._decode_native_and_split(tokens.to_vec())
            .flatten()
            .collect();
        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_is_configuration_error() {
        let err = Tokenizer::for_model("definitely-not-a-model").unwrap_err();
        assert!(matches!(err, ChunkError::Configuration(_)));
    }

    #[test]
    fn test_vocabulary_loaded_once_per_model() {
        let a = Tokenizer::for_model("gpt-3.5-turbo").unwrap();
        let b = Tokenizer::for_model("gpt-3.5-turbo").unwrap();
        assert!(Arc::ptr_eq(&a.bpe, &b.bpe));
    }

    #[test]
    fn test_round_trip_ascii() {
        let tokenizer = Tokenizer::for_model("gpt-3.5-turbo").unwrap();
        let text = "Retrieval augmented generation needs good chunks.";
        let tokens = tokenizer.encode(text);
        assert!(!tokens.is_empty());
        assert_eq!(tokenizer.decode(&tokens), text);
    }

    #[test]
    fn test_round_trip_unicode() {
        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        let text = "Ünïcödé text, 日本語のテキスト, and emoji 🎉🚀";
        assert_eq!(tokenizer.decode(&tokenizer.encode(text)), text);
    }

    #[test]
    fn test_partial_character_decodes_lossily() {
        let tokenizer = Tokenizer::for_model("gpt-4").unwrap();
        // Rare CJK extension-B ideographs are encoded as raw byte tokens.
        let text = "𠜎𠜱𠝹";
        let tokens = tokenizer.encode(text);
        assert!(tokens.len() > 1);
        let split_somewhere = (1..tokens.len())
            .any(|k| tokenizer.decode(&tokens[..k]).contains('\u{FFFD}'));
        assert!(split_somewhere);
    }

    #[test]
    fn test_special_token_text_is_ordinary() {
        let tokenizer = Tokenizer::for_model("gpt-3.5-turbo").unwrap();
        let text = "before <|endoftext|> after";
        assert_eq!(tokenizer.decode(&tokenizer.encode(text)), text);
    }

    #[test]
    fn test_truncate() {
        let tokenizer = Tokenizer::for_model("gpt-3.5-turbo").unwrap();
        let text = "one two three four five six seven eight nine ten";
        let short = tokenizer.truncate(text, 3);
        assert_eq!(tokenizer.count_tokens(&short), 3);
        assert!(text.starts_with(&short));
        assert_eq!(tokenizer.truncate(text, 1000), text);
    }
}
