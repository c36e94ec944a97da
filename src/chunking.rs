use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const DEFAULT_WINDOW_WORDS: usize = 500;
pub const DEFAULT_OVERLAP_WORDS: usize = 50;

/// One overlapping word-window of a larger text. Downstream consumers
/// (analysis, retrieval) rely on `index` being contiguous from zero and on
/// windows appearing in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TextChunk {
    pub index: i32,
    pub content: String,
    pub start_word_offset: i32,
    pub word_count: i32,
    pub char_length: i32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChunkingError {
    #[error("invalid chunking parameters: window={window_words} overlap={overlap_words} (window must be > 0 and > overlap)")]
    InvalidParameters {
        window_words: usize,
        overlap_words: usize,
    },

    #[error("cannot chunk empty text")]
    EmptyText,
}

/// Splits `text` into overlapping word windows of `window_words` words,
/// each window starting `window_words - overlap_words` words after the
/// previous one. The last window may be shorter; the sweep stops at the
/// first window that reaches the end of the word sequence.
///
/// Degenerate parameters and empty input are rejected up front so the
/// sweep can never loop without advancing.
pub fn chunk_text(
    text: &str,
    window_words: usize,
    overlap_words: usize,
) -> Result<Vec<TextChunk>, ChunkingError> {
    if window_words == 0 || overlap_words >= window_words {
        return Err(ChunkingError::InvalidParameters {
            window_words,
            overlap_words,
        });
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Err(ChunkingError::EmptyText);
    }

    let stride = window_words - overlap_words;
    let mut chunks = Vec::with_capacity(expected_chunk_count(words.len(), window_words, overlap_words));
    let mut start = 0usize;

    loop {
        let end = usize::min(start + window_words, words.len());
        let content = words[start..end].join(" ");
        chunks.push(TextChunk {
            index: chunks.len() as i32,
            start_word_offset: start as i32,
            word_count: (end - start) as i32,
            char_length: content.chars().count() as i32,
            content,
        });

        if end == words.len() {
            break;
        }
        start += stride;
    }

    Ok(chunks)
}

/// Number of windows `chunk_text` produces for `word_count` words:
/// `ceil(max(N - overlap, 1) / (window - overlap))`.
pub fn expected_chunk_count(word_count: usize, window_words: usize, overlap_words: usize) -> usize {
    if word_count == 0 {
        return 0;
    }
    let stride = window_words.saturating_sub(overlap_words).max(1);
    let effective = word_count.saturating_sub(overlap_words).max(1);
    effective.div_ceil(stride)
}
