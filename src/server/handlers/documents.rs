use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::config::ALLOWED_EXTENSIONS;
use crate::core::errors::ApiError;
use crate::ingest::extension_of;
use crate::state::AppState;

/// `POST /upload` — multipart upload of a single document.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("Missing filename".to_string()))?;

        let ext = extension_of(&filename);
        if !state.settings.is_allowed_extension(&ext) {
            return Err(ApiError::BadRequest(format!(
                "File type .{} not supported. Allowed types: {}",
                ext,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        if bytes.len() as u64 > state.settings.max_file_size {
            return Err(ApiError::BadRequest(format!(
                "File too large. Maximum size: {:.1}MB",
                state.settings.max_file_size as f64 / (1024.0 * 1024.0)
            )));
        }

        let metadata = state.processor.process(&bytes, &filename).await;
        return Ok(Json(metadata));
    }

    Err(ApiError::BadRequest("Missing 'file' field".to_string()))
}

/// `GET /documents` — all known documents.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = state.store.list_documents().await?;
    Ok(Json(documents))
}

/// `DELETE /documents/:filename` — drop a document and its chunks.
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Clients may double-encode filenames with spaces or slashes.
    let decoded = urlencoding::decode(&filename)
        .map(|c| c.into_owned())
        .unwrap_or(filename);

    let deleted = state.store.delete_document(&decoded).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Document not found".to_string()));
    }

    tracing::info!("Deleted document '{}' ({} chunks)", decoded, deleted);
    Ok(Json(json!({
        "message": format!("Document '{}' deleted successfully", decoded),
    })))
}
