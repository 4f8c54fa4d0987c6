use ragdoc_config::Config;
use ragdoc_core::chunking::{ChunkParams, TokenChunker, TokenCodec, Tokenizer};
use ragdoc_core::chunk_text;

fn sample_document() -> String {
    let paragraph = "Vector databases store embeddings so that similar passages can be \
                     found quickly. A chatbot retrieves the closest passages for a question \
                     and passes them to the language model as context. ";
    paragraph.repeat(12)
}

fn tokenizer() -> Tokenizer {
    Tokenizer::for_model("gpt-3.5-turbo").expect("cl100k tokenizer")
}

#[test]
fn disjoint_chunks_reassemble_the_document() {
    let tokenizer = tokenizer();
    let text = sample_document();
    let chunks = chunk_text(&tokenizer, &text, 37, 0).unwrap();

    assert!(chunks.len() > 1);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn overlapping_spans_cover_the_token_sequence() {
    let tokenizer = tokenizer();
    let text = sample_document();
    let total = tokenizer.count_tokens(&text);

    let chunker = TokenChunker::new(tokenizer.clone(), ChunkParams::new(50, 12).unwrap());
    let chunks = chunker.chunk_with_spans(&text);

    assert_eq!(chunks.first().unwrap().span.start, 0);
    assert_eq!(chunks.last().unwrap().span.end, total);
    for pair in chunks.windows(2) {
        // consecutive chunks share exactly `overlap` tokens
        assert_eq!(pair[0].span.end - pair[1].span.start, 12);
    }
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert!(chunk.span.len() <= 50);
    }
}

#[test]
fn re_encoded_chunks_stay_within_budget() {
    let tokenizer = tokenizer();
    let text = sample_document();
    for chunk in chunk_text(&tokenizer, &text, 40, 8).unwrap() {
        assert!(tokenizer.count_tokens(&chunk) <= 40, "chunk too long: {chunk:?}");
    }
}

#[test]
fn chunk_boundaries_follow_token_counts() {
    let tokenizer = tokenizer();
    let text = "alpha beta gamma delta epsilon zeta eta theta";
    let n = tokenizer.count_tokens(text);

    assert_eq!(chunk_text(&tokenizer, text, n, 0).unwrap().len(), 1);
    assert_eq!(chunk_text(&tokenizer, text, n - 1, 0).unwrap().len(), 2);
}

#[test]
fn chunking_is_deterministic() {
    let mut config = Config::default();
    config.llm.model = "gpt-4".to_string();
    let chunker = TokenChunker::from_config(&config).unwrap();
    let text = sample_document();
    assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
}

#[test]
fn multilingual_text_chunks_are_valid_text() {
    let tokenizer = tokenizer();
    let text = "Le modèle répond en français. 模型也可以用中文回答。Модель отвечает по-русски.";
    let whole = chunk_text(&tokenizer, text, 10_000, 0).unwrap();
    assert_eq!(whole, vec![text.to_string()]);

    let small = chunk_text(&tokenizer, text, 3, 1).unwrap();
    assert!(small.len() > 1);
    assert!(small.iter().all(|c| !c.is_empty()));
}

#[test]
fn shared_chunker_across_threads() {
    let chunker = std::sync::Arc::new(
        TokenChunker::new(tokenizer(), ChunkParams::new(16, 4).unwrap()),
    );
    let text = sample_document();
    let expected = chunker.chunk(&text);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let chunker = chunker.clone();
            let text = text.clone();
            std::thread::spawn(move || chunker.chunk(&text))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
