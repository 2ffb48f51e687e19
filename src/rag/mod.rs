//! RAG (Retrieval-Augmented Generation) module.
//!
//! This module provides:
//! - `VectorStore` / `SqliteVectorStore`: chunk persistence and similarity search
//! - `RagPipeline`: retrieve, synthesize an answer, score confidence,
//!   and suggest knowledge-base enrichment

mod context;
mod enrichment;
mod parser;
mod pipeline;
mod prompts;
mod sqlite;
mod store;

pub use pipeline::RagPipeline;
pub use sqlite::SqliteVectorStore;
pub use store::{ChunkSearchResult, StoredChunk, VectorStore};
