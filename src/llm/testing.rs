//! In-crate mock provider for unit tests.

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use async_trait::async_trait;

use super::provider::LlmProvider;
use super::types::ChatRequest;
use crate::core::errors::ApiError;

const EMBEDDING_DIM: usize = 16;

/// Deterministic bag-of-words embedding: words hash into buckets, the
/// vector is L2-normalized. Texts sharing words get high cosine
/// similarity, which is all retrieval tests need.
pub fn keyword_embedding(text: &str) -> Vec<f32> {
    let mut vec = vec![0.0f32; EMBEDDING_DIM];
    for word in text.to_lowercase().split_whitespace() {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        let idx = (hasher.finish() % EMBEDDING_DIM as u64) as usize;
        vec[idx] += 1.0;
    }

    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vec {
            *x /= norm;
        }
    }
    vec
}

/// Scripted LLM provider: chat replies are popped from a queue, and
/// embeddings are deterministic keyword vectors.
pub struct MockProvider {
    chat_replies: Mutex<VecDeque<String>>,
    fail_embeddings: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            chat_replies: Mutex::new(VecDeque::new()),
            fail_embeddings: false,
        }
    }

    pub fn with_chat_replies(replies: &[&str]) -> Self {
        Self {
            chat_replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            fail_embeddings: false,
        }
    }

    pub fn failing_embeddings() -> Self {
        Self {
            chat_replies: Mutex::new(VecDeque::new()),
            fail_embeddings: true,
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        Ok(true)
    }

    async fn chat(&self, _request: ChatRequest, _model_id: &str) -> Result<String, ApiError> {
        let mut replies = self.chat_replies.lock().expect("mock lock poisoned");
        Ok(replies.pop_front().unwrap_or_else(|| "{}".to_string()))
    }

    async fn embed(&self, inputs: &[String], _model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        if self.fail_embeddings {
            return Err(ApiError::Internal("embedding backend down".to_string()));
        }
        Ok(inputs.iter().map(|text| keyword_embedding(text)).collect())
    }
}
