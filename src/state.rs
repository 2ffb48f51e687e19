use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::config::{AppPaths, Settings};
use crate::ingest::DocumentProcessor;
use crate::llm::{LlmProvider, OpenAiProvider};
use crate::rag::{RagPipeline, SqliteVectorStore, VectorStore};
use crate::ratings::RatingsStore;

#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub settings: Settings,
    pub store: Arc<dyn VectorStore>,
    pub ratings: RatingsStore,
    pub llm: Arc<dyn LlmProvider>,
    pub processor: DocumentProcessor,
    pub pipeline: RagPipeline,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub async fn initialize() -> anyhow::Result<Arc<Self>> {
        let paths = Arc::new(AppPaths::new());
        let settings = Settings::from_env();
        let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(
            settings.api_base_url.clone(),
            settings.api_key.clone(),
        ));

        Self::build(paths, settings, llm).await
    }

    /// Assemble state from explicit parts; tests inject their own
    /// paths and provider here.
    pub async fn build(
        paths: Arc<AppPaths>,
        settings: Settings,
        llm: Arc<dyn LlmProvider>,
    ) -> anyhow::Result<Arc<Self>> {
        let vector_store = SqliteVectorStore::with_path(paths.db_path.clone()).await?;
        let ratings = RatingsStore::new(vector_store.pool().clone());
        ratings.init_schema().await?;
        let store: Arc<dyn VectorStore> = Arc::new(vector_store);

        let processor = DocumentProcessor::new(settings.clone(), store.clone(), llm.clone());
        let pipeline = RagPipeline::new(settings.clone(), store.clone(), llm.clone());

        Ok(Arc::new(AppState {
            paths,
            settings,
            store,
            ratings,
            llm,
            processor,
            pipeline,
            started_at: Utc::now(),
        }))
    }
}
