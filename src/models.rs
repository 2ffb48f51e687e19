//! Domain types shared between the ingestion pipeline, the answer
//! pipeline, and the HTTP surface. All of these serialize to the JSON
//! shapes the frontend consumes.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Qualitative bucket derived from the numeric confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// What kind of information the answer was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInfoType {
    Document,
    Data,
    Context,
    SpecificFact,
}

/// A specific gap identified while answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingInfo {
    #[serde(rename = "type")]
    pub kind: MissingInfoType,
    pub description: String,
    pub suggested_action: String,
    /// 1-5, 5 being highest priority.
    pub priority: u8,
}

/// A recommendation for enriching the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub action: String,
    pub confidence: f64,
    /// "low", "medium", or "high".
    pub estimated_effort: String,
}

/// A retrieved chunk cited by an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub filename: String,
    pub similarity_score: f32,
    pub chunk_index: usize,
    pub content_preview: String,
}

/// Full answer payload for a search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub answer: String,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub sources: Vec<SourceRef>,
    pub missing_info: Vec<MissingInfo>,
    pub enrichment_suggestions: Vec<EnrichmentSuggestion>,
    /// Wall-clock seconds spent producing the answer.
    pub processing_time: f64,
}

/// JSON body accepted by `POST /search-json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default = "default_true")]
    pub include_confidence: bool,
    #[serde(default = "default_true")]
    pub include_enrichment: bool,
}

/// Per-document summary, aggregated from stored chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    /// RFC 3339 timestamp of the upload.
    pub upload_date: String,
    pub file_size: u64,
    pub content_type: String,
    pub chunk_count: usize,
    /// "completed" or "error: ..." for failed ingestion.
    pub processing_status: String,
}

/// User feedback on an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRating {
    pub query: String,
    /// 1-5.
    pub rating: u8,
    pub feedback: Option<String>,
    pub improvement_suggestions: Option<String>,
}

/// A rating as persisted, with its id and record time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRating {
    pub id: i64,
    pub query: String,
    pub rating: u8,
    pub feedback: Option<String>,
    pub improvement_suggestions: Option<String>,
    pub timestamp: String,
}
