//! Orchestrates ingestion: extract -> chunk -> embed -> store.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::{chunker, extract};
use crate::core::config::Settings;
use crate::core::errors::ApiError;
use crate::llm::LlmProvider;
use crate::models::DocumentMetadata;
use crate::rag::{StoredChunk, VectorStore};

#[derive(Clone)]
pub struct DocumentProcessor {
    settings: Settings,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmProvider>,
}

impl DocumentProcessor {
    pub fn new(settings: Settings, store: Arc<dyn VectorStore>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            settings,
            store,
            llm,
        }
    }

    /// Process an uploaded file into stored chunks.
    ///
    /// Ingestion failures are reported through `processing_status`
    /// rather than an error, so the upload response always carries the
    /// document's metadata.
    pub async fn process(&self, bytes: &[u8], filename: &str) -> DocumentMetadata {
        let upload_date = Utc::now().to_rfc3339();
        let content_type = extract::content_type_for(filename);

        match self
            .ingest(bytes, filename, &upload_date, content_type)
            .await
        {
            Ok(chunk_count) => {
                tracing::info!(
                    "Ingested '{}': {} chunks ({} bytes)",
                    filename,
                    chunk_count,
                    bytes.len()
                );
                DocumentMetadata {
                    filename: filename.to_string(),
                    upload_date,
                    file_size: bytes.len() as u64,
                    content_type: content_type.to_string(),
                    chunk_count,
                    processing_status: "completed".to_string(),
                }
            }
            Err(err) => {
                tracing::warn!("Failed to ingest '{}': {}", filename, err);
                DocumentMetadata {
                    filename: filename.to_string(),
                    upload_date,
                    file_size: bytes.len() as u64,
                    content_type: content_type.to_string(),
                    chunk_count: 0,
                    processing_status: format!("error: {}", err),
                }
            }
        }
    }

    async fn ingest(
        &self,
        bytes: &[u8],
        filename: &str,
        upload_date: &str,
        content_type: &str,
    ) -> Result<usize, ApiError> {
        let text = extract::extract_text(bytes, filename)?;

        let chunks = chunker::split_into_chunks(
            &text,
            filename,
            self.settings.chunk_size,
            self.settings.chunk_overlap,
        );
        if chunks.is_empty() {
            return Err(ApiError::BadRequest(
                "No text content found in the document".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = self
            .llm
            .embed(&texts, &self.settings.embedding_model)
            .await?;
        if embeddings.len() != chunks.len() {
            return Err(ApiError::Internal(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        // Re-uploading a filename replaces its previous chunks.
        self.store.delete_document(filename).await?;

        let doc_id = Uuid::new_v4();
        let total_chunks = chunks.len();
        let items = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                let stored = StoredChunk {
                    chunk_id: format!("{}_chunk_{}", doc_id, chunk.chunk_index),
                    content: chunk.text,
                    filename: filename.to_string(),
                    metadata: Some(json!({
                        "chunk_index": chunk.chunk_index,
                        "total_chunks": total_chunks,
                        "upload_date": upload_date,
                        "content_type": content_type,
                        "file_size": bytes.len(),
                    })),
                };
                (stored, embedding)
            })
            .collect();

        self.store.insert_batch(items).await?;
        Ok(total_chunks)
    }
}
