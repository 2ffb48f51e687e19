use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::models::AnswerRating;
use crate::state::AppState;

/// `POST /rate-answer` — record user feedback on an answer.
pub async fn rate_answer(
    State(state): State<Arc<AppState>>,
    Json(rating): Json<AnswerRating>,
) -> Result<impl IntoResponse, ApiError> {
    if !(1..=5).contains(&rating.rating) {
        return Err(ApiError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let rating_id = state.ratings.add(&rating).await?;
    Ok(Json(json!({
        "message": "Rating recorded successfully",
        "rating_id": rating_id,
    })))
}

/// `GET /ratings` — every recorded rating, for analytics.
pub async fn get_ratings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let ratings = state.ratings.list().await?;
    let total = ratings.len();
    Ok(Json(json!({
        "ratings": ratings,
        "total": total,
    })))
}

/// `GET /stats` — knowledge-base totals.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = state.store.list_documents().await?;
    let total_chunks = state.store.count_chunks().await?;
    let (total_ratings, average_rating) = state.ratings.stats().await?;

    Ok(Json(json!({
        "total_documents": documents.len(),
        "total_chunks": total_chunks,
        "total_ratings": total_ratings,
        "average_rating": average_rating,
    })))
}
