//! VectorStore trait — abstract interface for chunk storage backends.
//!
//! Provides a clean abstraction over vector databases for the RAG
//! pipeline. The primary implementation is `SqliteVectorStore` in the
//! `sqlite` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::models::DocumentMetadata;

/// A stored chunk with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Unique chunk identifier (`{document_id}_chunk_{index}`).
    pub chunk_id: String,
    /// The text content of the chunk.
    pub content: String,
    /// Filename of the document that owns this chunk.
    pub filename: String,
    /// Chunk metadata (chunk_index, total_chunks, upload_date,
    /// content_type, file_size).
    pub metadata: Option<serde_json::Value>,
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSearchResult {
    pub chunk: StoredChunk,
    /// Cosine similarity (higher = better).
    pub score: f32,
}

/// Abstract trait for chunk storage backends.
///
/// Implementations should support:
/// - Vector similarity search
/// - Document-scoped chunk management
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert chunks with their embedding vectors, atomically.
    async fn insert_batch(
        &self,
        items: Vec<(StoredChunk, Vec<f32>)>,
    ) -> Result<(), ApiError>;

    /// Search for chunks similar to the query embedding.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ChunkSearchResult>, ApiError>;

    /// List known documents, aggregated from their chunks.
    async fn list_documents(&self) -> Result<Vec<DocumentMetadata>, ApiError>;

    /// Delete all chunks for a document. Returns the number removed.
    async fn delete_document(&self, filename: &str) -> Result<usize, ApiError>;

    /// Total chunk count across all documents.
    async fn count_chunks(&self) -> Result<usize, ApiError>;
}
