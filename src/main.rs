use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use kbsearch_backend::core;
use kbsearch_backend::server;
use kbsearch_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let state = AppState::initialize().await?;
    core::logging::init(&state.paths);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(8000);
    let bind_addr = format!("0.0.0.0:{}", port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    tracing::info!("Listening on {}", addr);

    match state.llm.health_check().await {
        Ok(true) => tracing::info!("LLM provider '{}' reachable", state.llm.name()),
        _ => tracing::warn!(
            "LLM provider '{}' unreachable; searches will degrade until it comes back",
            state.llm.name()
        ),
    }

    let app: Router = server::router::router(state.clone());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
