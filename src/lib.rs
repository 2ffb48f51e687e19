pub mod core;
pub mod ingest;
pub mod llm;
pub mod models;
pub mod rag;
pub mod ratings;
pub mod server;
pub mod state;
