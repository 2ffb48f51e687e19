//! Sliding-window text chunker.
//!
//! Splits extracted text into overlapping character windows, cutting at
//! sentence boundaries where possible so chunks stay readable.

use serde::{Deserialize, Serialize};

/// A text chunk with source information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// The text content
    pub text: String,
    /// Source identifier (filename)
    pub source: String,
    /// Character offset in the original document
    pub start_offset: usize,
    /// Chunk index within the source
    pub chunk_index: usize,
}

/// Split text into overlapping chunks of roughly `chunk_size` characters.
///
/// The window advances by `chunk_size - overlap` characters; the step is
/// clamped to at least 1 so a pathological overlap cannot stall the loop.
/// Empty chunks (runs of whitespace) are dropped.
pub fn split_into_chunks(
    text: &str,
    source: &str,
    chunk_size: usize,
    overlap: usize,
) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let total_chars = chars.len();

    if total_chars == 0 || chunk_size == 0 {
        return chunks;
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut start = 0;
    let mut chunk_index = 0;

    while start < total_chars {
        let end = (start + chunk_size).min(total_chars);
        let chunk_text: String = chars[start..end].iter().collect();

        // Try to break at a sentence boundary unless this is the tail.
        let final_text = if end < total_chars {
            cut_at_sentence_boundary(&chunk_text)
        } else {
            chunk_text
        };

        let trimmed = final_text.trim();
        if !trimmed.is_empty() {
            chunks.push(TextChunk {
                text: trimmed.to_string(),
                source: source.to_string(),
                start_offset: start,
                chunk_index,
            });
            chunk_index += 1;
        }

        start += step;
    }

    chunks
}

/// Cut the chunk at the last sentence ending in its final 20%, if any.
fn cut_at_sentence_boundary(text: &str) -> String {
    let sentence_endings = [". ", "! ", "? ", ".\n", "!\n", "?\n"];

    let mut search_start = (text.len() * 80) / 100;
    while search_start < text.len() && !text.is_char_boundary(search_start) {
        search_start += 1;
    }
    let search_text = &text[search_start..];

    for ending in sentence_endings.iter() {
        if let Some(pos) = search_text.rfind(ending) {
            let cut_pos = search_start + pos + ending.len();
            return text[..cut_pos].to_string();
        }
    }

    text.to_string()
}
