//! Context block assembly from retrieved chunks.

use super::store::ChunkSearchResult;
use crate::models::SourceRef;

const PREVIEW_CHARS: usize = 200;

/// Format retrieved chunks into the context block given to the LLM:
/// numbered entries carrying the source filename and similarity score.
pub fn build_context(results: &[ChunkSearchResult]) -> String {
    let mut parts = Vec::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        parts.push(format!(
            "Document {} (Source: {}, Similarity: {:.2}):\n{}\n",
            i + 1,
            result.chunk.filename,
            result.score,
            result.chunk.content
        ));
    }
    parts.join("\n")
}

/// Source citations for the response payload.
pub fn format_sources(results: &[ChunkSearchResult]) -> Vec<SourceRef> {
    results
        .iter()
        .map(|result| SourceRef {
            filename: result.chunk.filename.clone(),
            similarity_score: result.score,
            chunk_index: result
                .chunk
                .metadata
                .as_ref()
                .and_then(|m| m.get("chunk_index"))
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as usize,
            content_preview: preview(&result.chunk.content),
        })
        .collect()
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let truncated: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
