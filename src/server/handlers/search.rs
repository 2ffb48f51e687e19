use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;

use crate::core::errors::ApiError;
use crate::models::SearchQuery;
use crate::state::AppState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: String,
    #[serde(default = "default_true")]
    pub include_confidence: bool,
    #[serde(default = "default_true")]
    pub include_enrichment: bool,
}

/// `POST /search` — form-encoded search.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<impl IntoResponse, ApiError> {
    answer(
        state,
        &form.query,
        form.include_confidence,
        form.include_enrichment,
    )
    .await
}

/// `POST /search-json` — same search with a JSON body.
pub async fn search_json(
    State(state): State<Arc<AppState>>,
    Json(query): Json<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    answer(
        state,
        &query.query,
        query.include_confidence,
        query.include_enrichment,
    )
    .await
}

async fn answer(
    state: Arc<AppState>,
    query: &str,
    include_confidence: bool,
    include_enrichment: bool,
) -> Result<Json<crate::models::SearchResponse>, ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".to_string()));
    }

    let response = state
        .pipeline
        .search_and_answer(query, include_confidence, include_enrichment)
        .await;

    Ok(Json(response))
}
