//! LLM access layer.
//!
//! `LlmProvider` abstracts chat completion and embeddings behind a
//! trait so the answer pipeline can be tested without a live API.
//! The production implementation talks to any OpenAI-compatible
//! endpoint over HTTP.

mod openai;
mod provider;
#[cfg(test)]
pub mod testing;
mod types;

pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use types::{ChatMessage, ChatRequest};
