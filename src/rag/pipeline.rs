//! The answer pipeline: retrieve, synthesize, score, suggest.
//!
//! `search_and_answer` never returns an error to the caller; failures
//! degrade into a low-confidence `SearchResponse` so the UI always has
//! something to render.

use std::sync::Arc;
use std::time::Instant;

use super::{context, enrichment, parser, prompts};
use crate::core::config::Settings;
use crate::core::errors::ApiError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{
    ConfidenceLevel, EnrichmentSuggestion, MissingInfo, MissingInfoType, SearchResponse,
};
use crate::rag::VectorStore;

const ANSWER_MAX_TOKENS: i32 = 2000;
const COMPLETENESS_MAX_TOKENS: i32 = 1000;

/// Weighting between the model's own confidence and the completeness
/// review when both are available.
const ANSWER_CONFIDENCE_WEIGHT: f64 = 0.7;
const COMPLETENESS_WEIGHT: f64 = 0.3;

#[derive(Clone)]
pub struct RagPipeline {
    settings: Settings,
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmProvider>,
}

impl RagPipeline {
    pub fn new(settings: Settings, store: Arc<dyn VectorStore>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            settings,
            store,
            llm,
        }
    }

    /// Run the full pipeline for a query.
    pub async fn search_and_answer(
        &self,
        query: &str,
        include_confidence: bool,
        include_enrichment: bool,
    ) -> SearchResponse {
        let started = Instant::now();

        let mut response = match self
            .run(query, include_confidence, include_enrichment)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Answer pipeline failed for query: {}", err);
                Self::degraded_response(&err)
            }
        };

        response.processing_time = started.elapsed().as_secs_f64();
        response
    }

    async fn run(
        &self,
        query: &str,
        include_confidence: bool,
        include_enrichment: bool,
    ) -> Result<SearchResponse, ApiError> {
        // Step 1: retrieve the most similar chunks.
        let query_embedding = self
            .llm
            .embed(&[query.to_string()], &self.settings.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("empty embedding response".to_string()))?;

        let results = self
            .store
            .search(&query_embedding, self.settings.top_k)
            .await?;

        if results.is_empty() {
            return Ok(self.empty_store_response());
        }

        // Step 2: synthesize a structured answer over the context.
        let context_block = context::build_context(&results);
        let prompt = prompts::answer_prompt(&context_block, query);
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(self.settings.temperature)
            .with_max_tokens(ANSWER_MAX_TOKENS);
        let reply = self.llm.chat(request, &self.settings.chat_model).await?;
        let parsed = parser::parse_answer(&reply);

        let answer = if parsed.answer.trim().is_empty() {
            "I couldn't generate a proper answer.".to_string()
        } else {
            parsed.answer
        };
        let mut confidence = parsed.confidence.clamp(0.0, 1.0);
        let mut missing_info: Vec<MissingInfo> = parsed
            .missing_info
            .into_iter()
            .map(|raw| raw.into_model())
            .collect();
        let mut enrichment_suggestions: Vec<EnrichmentSuggestion> = parsed
            .enrichment_suggestions
            .into_iter()
            .map(|raw| raw.into_model())
            .collect();

        // Step 3: second pass scoring how complete the answer is.
        if include_confidence || include_enrichment {
            let report = self
                .analyze_completeness(&answer, query, &context_block)
                .await;

            confidence = (confidence * ANSWER_CONFIDENCE_WEIGHT
                + report.completeness_score.clamp(0.0, 1.0) * COMPLETENESS_WEIGHT)
                .clamp(0.0, 1.0);

            for aspect in report.missing_aspects {
                missing_info.push(MissingInfo {
                    kind: MissingInfoType::Context,
                    description: aspect.clone(),
                    suggested_action: format!(
                        "Find additional documents that cover: {}",
                        aspect
                    ),
                    priority: 3,
                });
            }
        }

        // Step 4: heuristic enrichment replaces whatever the model
        // volunteered, since it also accounts for the query shape.
        if include_enrichment {
            enrichment_suggestions = enrichment::suggest_enrichment(query, &missing_info);
        }

        Ok(SearchResponse {
            answer,
            confidence,
            confidence_level: self.confidence_level(confidence),
            sources: context::format_sources(&results),
            missing_info,
            enrichment_suggestions,
            processing_time: 0.0,
        })
    }

    async fn analyze_completeness(
        &self,
        answer: &str,
        query: &str,
        context_block: &str,
    ) -> parser::CompletenessReport {
        let prompt = prompts::completeness_prompt(answer, query, context_block);
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(0.1)
            .with_max_tokens(COMPLETENESS_MAX_TOKENS);

        match self.llm.chat(request, &self.settings.chat_model).await {
            Ok(reply) => parser::parse_completeness(&reply),
            Err(err) => {
                tracing::warn!("Completeness analysis failed: {}", err);
                parser::CompletenessReport {
                    completeness_score: 0.5,
                    ..Default::default()
                }
            }
        }
    }

    fn confidence_level(&self, confidence: f64) -> ConfidenceLevel {
        if confidence >= self.settings.high_confidence_threshold {
            ConfidenceLevel::High
        } else if confidence >= self.settings.medium_confidence_threshold {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Canned response when the knowledge base has nothing relevant.
    fn empty_store_response(&self) -> SearchResponse {
        SearchResponse {
            answer: "I couldn't find any relevant documents to answer your question. \
                     Please upload some documents first."
                .to_string(),
            confidence: 0.0,
            confidence_level: ConfidenceLevel::Low,
            sources: Vec::new(),
            missing_info: vec![MissingInfo {
                kind: MissingInfoType::Document,
                description: "No relevant documents found in the knowledge base".to_string(),
                suggested_action: "Upload documents related to your question".to_string(),
                priority: 5,
            }],
            enrichment_suggestions: vec![EnrichmentSuggestion {
                kind: "document_upload".to_string(),
                description: "Upload relevant documents to the knowledge base".to_string(),
                action: "Use the document upload feature to add files related to your question"
                    .to_string(),
                confidence: 1.0,
                estimated_effort: "low".to_string(),
            }],
            processing_time: 0.0,
        }
    }

    fn degraded_response(err: &ApiError) -> SearchResponse {
        SearchResponse {
            answer: format!("Error processing your query: {}", err),
            confidence: 0.0,
            confidence_level: ConfidenceLevel::Low,
            sources: Vec::new(),
            missing_info: Vec::new(),
            enrichment_suggestions: Vec::new(),
            processing_time: 0.0,
        }
    }
}
