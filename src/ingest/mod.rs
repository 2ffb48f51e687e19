//! Document ingestion pipeline.
//!
//! Turns an uploaded file into stored, embedded chunks:
//! extraction (per file format) -> chunking -> embedding -> vector store.

mod chunker;
mod extract;
mod processor;

pub use chunker::{split_into_chunks, TextChunk};
pub use extract::{content_type_for, extension_of, extract_text};
pub use processor::DocumentProcessor;
