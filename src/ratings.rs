//! Durable store for answer ratings.
//!
//! Ratings share the knowledge-base SQLite database; they feed the
//! `/ratings` listing and the aggregate numbers in `/stats`.

use sqlx::{Row, SqlitePool};

use crate::core::errors::ApiError;
use crate::models::{AnswerRating, StoredRating};

#[derive(Clone)]
pub struct RatingsStore {
    pool: SqlitePool,
}

impl RatingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<(), ApiError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS answer_ratings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query TEXT NOT NULL,
                rating INTEGER NOT NULL,
                feedback TEXT,
                improvement_suggestions TEXT,
                created_at TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(ApiError::internal)?;

        Ok(())
    }

    /// Record a rating, returning its id.
    pub async fn add(&self, rating: &AnswerRating) -> Result<i64, ApiError> {
        let result = sqlx::query(
            "INSERT INTO answer_ratings (query, rating, feedback, improvement_suggestions)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&rating.query)
        .bind(rating.rating as i64)
        .bind(&rating.feedback)
        .bind(&rating.improvement_suggestions)
        .execute(&self.pool)
        .await
        .map_err(ApiError::internal)?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list(&self) -> Result<Vec<StoredRating>, ApiError> {
        let rows = sqlx::query(
            "SELECT id, query, rating, feedback, improvement_suggestions, created_at
             FROM answer_ratings ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::internal)?;

        Ok(rows
            .into_iter()
            .map(|row| StoredRating {
                id: row.get("id"),
                query: row.get("query"),
                rating: row.get::<i64, _>("rating") as u8,
                feedback: row.get("feedback"),
                improvement_suggestions: row.get("improvement_suggestions"),
                timestamp: row.get("created_at"),
            })
            .collect())
    }

    /// Total number of ratings and their average (0.0 when empty).
    pub async fn stats(&self) -> Result<(usize, f64), ApiError> {
        let row = sqlx::query("SELECT COUNT(*) AS total, AVG(rating) AS average FROM answer_ratings")
            .fetch_one(&self.pool)
            .await
            .map_err(ApiError::internal)?;

        let total: i64 = row.get("total");
        let average: Option<f64> = row.get("average");

        Ok((total as usize, average.unwrap_or(0.0)))
    }
}
