//! Heuristic enrichment suggestions.
//!
//! Maps the shape of the question (procedural, definitional, temporal)
//! to the kind of document that would most likely improve future
//! answers, plus one suggestion per specific fact flagged as missing.

use crate::models::{EnrichmentSuggestion, MissingInfo, MissingInfoType};

const MAX_SUGGESTIONS: usize = 5;

pub fn suggest_enrichment(
    query: &str,
    missing_info: &[MissingInfo],
) -> Vec<EnrichmentSuggestion> {
    let mut suggestions = Vec::new();
    let query_lower = query.to_lowercase();

    let contains_any =
        |words: &[&str]| words.iter().any(|word| query_lower.contains(word));

    if contains_any(&["how", "process", "steps", "procedure"]) {
        suggestions.push(EnrichmentSuggestion {
            kind: "procedure_document".to_string(),
            description: "Step-by-step procedure or manual".to_string(),
            action: "Upload procedure documents, user manuals, or process guides".to_string(),
            confidence: 0.8,
            estimated_effort: "medium".to_string(),
        });
    }

    if contains_any(&["what", "definition", "meaning", "is"]) {
        suggestions.push(EnrichmentSuggestion {
            kind: "reference_document".to_string(),
            description: "Glossary, definitions, or reference material".to_string(),
            action: "Upload reference documents, glossaries, or specification sheets".to_string(),
            confidence: 0.7,
            estimated_effort: "low".to_string(),
        });
    }

    if contains_any(&["when", "date", "time", "schedule"]) {
        suggestions.push(EnrichmentSuggestion {
            kind: "temporal_document".to_string(),
            description: "Timeline, schedule, or date-specific information".to_string(),
            action: "Upload schedules, timelines, or historical records".to_string(),
            confidence: 0.8,
            estimated_effort: "medium".to_string(),
        });
    }

    for info in missing_info {
        if info.kind == MissingInfoType::SpecificFact {
            suggestions.push(EnrichmentSuggestion {
                kind: "factual_document".to_string(),
                description: format!("Document containing: {}", info.description),
                action: if info.suggested_action.is_empty() {
                    "Find relevant documents".to_string()
                } else {
                    info.suggested_action.clone()
                },
                confidence: 0.6,
                estimated_effort: "high".to_string(),
            });
        }
    }

    // Dedup by suggestion kind, keep the first of each.
    let mut unique = Vec::new();
    for suggestion in suggestions {
        if !unique
            .iter()
            .any(|existing: &EnrichmentSuggestion| existing.kind == suggestion.kind)
        {
            unique.push(suggestion);
        }
    }
    unique.truncate(MAX_SUGGESTIONS);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(description: &str) -> MissingInfo {
        MissingInfo {
            kind: MissingInfoType::SpecificFact,
            description: description.to_string(),
            suggested_action: String::new(),
            priority: 3,
        }
    }

    #[test]
    fn procedural_query_suggests_procedure_docs() {
        let suggestions = suggest_enrichment("How do I reset the router?", &[]);
        assert!(suggestions.iter().any(|s| s.kind == "procedure_document"));
    }

    #[test]
    fn definitional_query_suggests_reference_docs() {
        let suggestions = suggest_enrichment("What is an SLA?", &[]);
        assert!(suggestions.iter().any(|s| s.kind == "reference_document"));
    }

    #[test]
    fn temporal_query_suggests_temporal_docs() {
        let suggestions = suggest_enrichment("When does the contract expire?", &[]);
        assert!(suggestions.iter().any(|s| s.kind == "temporal_document"));
    }

    #[test]
    fn specific_facts_generate_one_suggestion_each_deduped() {
        let missing = vec![fact("vendor pricing"), fact("contact details")];
        let suggestions = suggest_enrichment("zzz", &missing);
        // Deduped by kind: a single factual_document suggestion survives.
        assert_eq!(
            suggestions
                .iter()
                .filter(|s| s.kind == "factual_document")
                .count(),
            1
        );
        assert!(suggestions[0].description.contains("vendor pricing"));
    }

    #[test]
    fn suggestions_are_capped() {
        let missing = vec![fact("a"), fact("b")];
        let suggestions =
            suggest_enrichment("how and what and when is the schedule", &missing);
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }
}
