//! Structured-output parsing for LLM replies.
//!
//! The model is asked to answer with a JSON object, but replies often
//! carry surrounding prose. Parsing locates the outermost `{...}` span
//! and deserializes it; failures fall back to safe defaults instead of
//! surfacing an error to the user.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{EnrichmentSuggestion, MissingInfo, MissingInfoType};

fn default_confidence() -> f64 {
    0.5
}

fn default_effort() -> String {
    "medium".to_string()
}

fn default_priority() -> i64 {
    3
}

/// Structured answer as produced by the synthesis prompt.
#[derive(Debug, Deserialize)]
pub struct StructuredAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub missing_info: Vec<RawMissingInfo>,
    #[serde(default)]
    pub enrichment_suggestions: Vec<RawSuggestion>,
}

#[derive(Debug, Deserialize)]
pub struct RawMissingInfo {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub suggested_action: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

#[derive(Debug, Deserialize)]
pub struct RawSuggestion {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_effort")]
    pub estimated_effort: String,
}

/// Completeness analysis as produced by the review prompt.
#[derive(Debug, Default, Deserialize)]
pub struct CompletenessReport {
    #[serde(default = "default_confidence")]
    pub completeness_score: f64,
    #[serde(default)]
    pub missing_aspects: Vec<String>,
    #[serde(default)]
    pub confidence_issues: Vec<String>,
    #[serde(default)]
    pub suggested_improvements: Vec<String>,
}

impl RawMissingInfo {
    pub fn into_model(self) -> MissingInfo {
        let kind = match self.kind.as_str() {
            "document" => MissingInfoType::Document,
            "data" => MissingInfoType::Data,
            "specific_fact" => MissingInfoType::SpecificFact,
            _ => MissingInfoType::Context,
        };

        MissingInfo {
            kind,
            description: self.description,
            suggested_action: self.suggested_action,
            priority: self.priority.clamp(1, 5) as u8,
        }
    }
}

impl RawSuggestion {
    pub fn into_model(self) -> EnrichmentSuggestion {
        EnrichmentSuggestion {
            kind: self.kind,
            description: self.description,
            action: self.action,
            confidence: self.confidence.clamp(0.0, 1.0),
            estimated_effort: self.estimated_effort,
        }
    }
}

/// Extract and deserialize the outermost JSON object in `text`.
pub fn parse_json_block<T: DeserializeOwned>(text: &str) -> Option<T> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Parse a synthesis reply. On failure the whole reply becomes the
/// answer with middling confidence.
pub fn parse_answer(text: &str) -> StructuredAnswer {
    parse_json_block(text).unwrap_or_else(|| StructuredAnswer {
        answer: text.to_string(),
        confidence: 0.5,
        missing_info: Vec::new(),
        enrichment_suggestions: Vec::new(),
    })
}

/// Parse a completeness reply, falling back to a neutral report.
pub fn parse_completeness(text: &str) -> CompletenessReport {
    parse_json_block(text).unwrap_or_else(|| CompletenessReport {
        completeness_score: 0.5,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_with_surrounding_prose() {
        let reply = r#"Sure, here is the result:
{"answer": "42", "confidence": 0.9, "missing_info": [], "enrichment_suggestions": []}
Hope that helps!"#;

        let parsed = parse_answer(reply);
        assert_eq!(parsed.answer, "42");
        assert!((parsed.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let parsed = parse_answer(r#"{"answer": "just text"}"#);
        assert_eq!(parsed.answer, "just text");
        assert!((parsed.confidence - 0.5).abs() < 1e-9);
        assert!(parsed.missing_info.is_empty());
    }

    #[test]
    fn non_json_reply_becomes_the_answer() {
        let parsed = parse_answer("I could not format that as JSON, sorry.");
        assert_eq!(parsed.answer, "I could not format that as JSON, sorry.");
        assert!((parsed.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn unknown_missing_info_type_falls_back_to_context() {
        let raw = RawMissingInfo {
            kind: "mystery".to_string(),
            description: "d".to_string(),
            suggested_action: "a".to_string(),
            priority: 9,
        };
        let info = raw.into_model();
        assert_eq!(info.kind, MissingInfoType::Context);
        assert_eq!(info.priority, 5);
    }

    #[test]
    fn completeness_parses_aspects() {
        let reply = r#"{"completeness_score": 0.7, "missing_aspects": ["dates", "owners"]}"#;
        let report = parse_completeness(reply);
        assert!((report.completeness_score - 0.7).abs() < 1e-9);
        assert_eq!(report.missing_aspects.len(), 2);
    }

    #[test]
    fn malformed_completeness_is_neutral() {
        let report = parse_completeness("no json here");
        assert!((report.completeness_score - 0.5).abs() < 1e-9);
        assert!(report.missing_aspects.is_empty());
    }
}
