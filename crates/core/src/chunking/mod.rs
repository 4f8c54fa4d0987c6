//! Token-bounded, overlapping document chunking.

pub mod tokenizer;

pub use tokenizer::{TokenCodec, Tokenizer};

use crate::error::ChunkError;
use ragdoc_config::Config;
use std::ops::Range;

/// Validated chunk size and overlap, both measured in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkParams {
    /// Requires `chunk_size > 0` and `overlap < chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidConfiguration {
                chunk_size,
                overlap,
                reason: "chunk_size must be > 0".to_string(),
            });
        }
        if overlap >= chunk_size {
            return Err(ChunkError::InvalidConfiguration {
                chunk_size,
                overlap,
                reason: "overlap must be < chunk_size".to_string(),
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Token spans of the chunks for a sequence of `token_count` tokens.
    ///
    /// Every index in `0..token_count` falls in at least one span and no span
    /// is longer than `chunk_size`.
    pub fn spans(&self, token_count: usize) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut start = 0;
        while start < token_count {
            let end = (start + self.chunk_size).min(token_count);
            spans.push(start..end);
            if end == token_count {
                break;
            }
            // end - overlap > start because overlap < chunk_size
            start = end - self.overlap;
        }
        spans
    }
}

impl TryFrom<&ragdoc_config::ChunkingConfig> for ChunkParams {
    type Error = ChunkError;

    fn try_from(config: &ragdoc_config::ChunkingConfig) -> Result<Self, Self::Error> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}

/// One decoded chunk and the token range it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub span: Range<usize>,
    pub text: String,
}

/// Splits text into overlapping chunks of at most `chunk_size` tokens.
#[derive(Debug, Clone)]
pub struct TokenChunker<C = Tokenizer> {
    codec: C,
    params: ChunkParams,
}

impl TokenChunker<Tokenizer> {
    /// Build a chunker from configuration. Chunk parameters are validated
    /// before the tokenizer is resolved.
    pub fn from_config(config: &Config) -> Result<Self, ChunkError> {
        let params = ChunkParams::try_from(&config.chunking)?;
        let tokenizer = Tokenizer::for_model(config.tokenizer_model())?;
        Ok(Self::new(tokenizer, params))
    }
}

impl<C: TokenCodec> TokenChunker<C> {
    pub fn new(codec: C, params: ChunkParams) -> Self {
        Self { codec, params }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn params(&self) -> ChunkParams {
        self.params
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunk_with_spans(text)
            .into_iter()
            .map(|c| c.text)
            .collect()
    }

    pub fn chunk_with_spans(&self, text: &str) -> Vec<TextChunk> {
        if text.is_empty() {
            return Vec::new();
        }

        self.chunk_tokens(&self.codec.encode(text))
    }

    /// Chunk an already encoded token sequence.
    pub fn chunk_tokens(&self, tokens: &[usize]) -> Vec<TextChunk> {
        let chunks: Vec<TextChunk> = self
            .params
            .spans(tokens.len())
            .into_iter()
            .enumerate()
            .map(|(index, span)| TextChunk {
                index,
                text: self.codec.decode(&tokens[span.clone()]),
                span,
            })
            .collect();

        tracing::debug!(
            tokens = tokens.len(),
            chunks = chunks.len(),
            chunk_size = self.params.chunk_size,
            overlap = self.params.overlap,
            "chunked text"
        );
        chunks
    }
}

/// Split `text` into chunks of at most `chunk_size` tokens, each repeating
/// the last `overlap` tokens of its predecessor.
pub fn chunk_text<C: TokenCodec>(
    codec: &C,
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, ChunkError> {
    let params = ChunkParams::new(chunk_size, overlap)?;
    Ok(TokenChunker::new(codec, params).chunk(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// One token per whitespace-separated word of a fixed vocabulary.
    struct WordCodec {
        vocab: Vec<&'static str>,
        encode_calls: AtomicUsize,
    }

    impl WordCodec {
        fn new(vocab: &[&'static str]) -> Self {
            Self {
                vocab: vocab.to_vec(),
                encode_calls: AtomicUsize::new(0),
            }
        }
    }

    impl TokenCodec for WordCodec {
        fn encode(&self, text: &str) -> Vec<usize> {
            self.encode_calls.fetch_add(1, Ordering::SeqCst);
            text.split_whitespace()
                .map(|w| self.vocab.iter().position(|v| *v == w).unwrap())
                .collect()
        }

        fn decode(&self, tokens: &[usize]) -> String {
            tokens
                .iter()
                .map(|t| self.vocab[*t])
                .collect::<Vec<_>>()
                .join(" ")
        }
    }

    const FIVE: &str = "aaaa bbbb cccc dddd eeee";

    fn five_word_codec() -> WordCodec {
        WordCodec::new(&["aaaa", "bbbb", "cccc", "dddd", "eeee"])
    }

    #[test]
    fn test_overlapping_scenario() {
        let codec = five_word_codec();
        let chunker = TokenChunker::new(&codec, ChunkParams::new(3, 1).unwrap());
        let chunks = chunker.chunk_with_spans(FIVE);

        assert_eq!(
            chunks.iter().map(|c| c.span.clone()).collect::<Vec<_>>(),
            vec![0..3, 2..5]
        );
        assert_eq!(chunks[0].text, "aaaa bbbb cccc");
        assert_eq!(chunks[1].text, "cccc dddd eeee");
    }

    #[test]
    fn test_disjoint_scenario() {
        let codec = five_word_codec();
        let chunks = chunk_text(&codec, FIVE, 3, 0).unwrap();
        assert_eq!(chunks, vec!["aaaa bbbb cccc", "dddd eeee"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let codec = five_word_codec();
        for (size, overlap) in [(1, 0), (3, 2), (100, 10)] {
            assert!(chunk_text(&codec, "", size, overlap).unwrap().is_empty());
        }
        assert_eq!(codec.encode_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_text_shorter_than_chunk() {
        let codec = five_word_codec();
        let chunks = chunk_text(&codec, "aaaa bbbb", 10, 3).unwrap();
        assert_eq!(chunks, vec!["aaaa bbbb"]);
    }

    #[test]
    fn test_exact_fit_is_one_chunk() {
        let params = ChunkParams::new(5, 2).unwrap();
        assert_eq!(params.spans(5), vec![0..5]);
    }

    #[test]
    fn test_one_past_fit_is_two_chunks() {
        let params = ChunkParams::new(5, 0).unwrap();
        assert_eq!(params.spans(6), vec![0..5, 5..6]);
    }

    #[test]
    fn test_zero_chunk_size_rejected_before_encoding() {
        let codec = five_word_codec();
        let err = chunk_text(&codec, FIVE, 0, 0).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidConfiguration { chunk_size: 0, .. }));
        assert_eq!(codec.encode_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_overlap_not_below_size_rejected_before_encoding() {
        let codec = five_word_codec();
        for (size, overlap) in [(3, 3), (3, 4), (1, 1)] {
            let err = chunk_text(&codec, FIVE, size, overlap).unwrap_err();
            assert!(matches!(err, ChunkError::InvalidConfiguration { .. }));
        }
        assert_eq!(codec.encode_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_spans_cover_every_token() {
        for n in 0..40 {
            for size in 1..8 {
                for overlap in 0..size {
                    let spans = ChunkParams::new(size, overlap).unwrap().spans(n);
                    let mut covered = vec![false; n];
                    for span in &spans {
                        assert!(span.len() <= size);
                        assert!(!span.is_empty());
                        covered[span.clone()].iter_mut().for_each(|c| *c = true);
                    }
                    assert!(covered.iter().all(|c| *c), "n={n} size={size} overlap={overlap}");
                    assert_eq!(spans.is_empty(), n == 0);
                }
            }
        }
    }

    #[test]
    fn test_spans_overlap_by_exactly_overlap() {
        let spans = ChunkParams::new(4, 2).unwrap().spans(11);
        assert_eq!(spans, vec![0..4, 2..6, 4..8, 6..10, 8..11]);
    }

    #[test]
    fn test_chunk_tokens_matches_chunk_with_spans() {
        let codec = five_word_codec();
        let chunker = TokenChunker::new(&codec, ChunkParams::new(3, 1).unwrap());
        let tokens = codec.encode(FIVE);
        let from_tokens = chunker.chunk_tokens(&tokens);
        assert_eq!(codec.encode_calls.load(Ordering::SeqCst), 1);

        assert_eq!(from_tokens, chunker.chunk_with_spans(FIVE));
        assert!(chunker.chunk_tokens(&[]).is_empty());
    }

    #[test]
    fn test_params_from_config() {
        let mut config = ragdoc_config::ChunkingConfig::default();
        let params = ChunkParams::try_from(&config).unwrap();
        assert_eq!((params.chunk_size(), params.overlap()), (100, 10));

        config.chunk_overlap = 100;
        assert!(ChunkParams::try_from(&config).is_err());
    }

    #[test]
    fn test_from_config_validates_before_tokenizer() {
        let mut config = Config::default();
        config.chunking.chunk_size = 0;
        config.chunking.tokenizer_model = Some("definitely-not-a-model".to_string());
        let err = TokenChunker::from_config(&config).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_from_config_unknown_model() {
        let mut config = Config::default();
        config.chunking.tokenizer_model = Some("definitely-not-a-model".to_string());
        let err = TokenChunker::from_config(&config).unwrap_err();
        assert!(matches!(err, ChunkError::Configuration(_)));
    }
}
