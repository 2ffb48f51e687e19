//! End-to-end tests over the axum router with a scripted LLM provider.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use kbsearch_backend::core::config::{AppPaths, Settings};
use kbsearch_backend::core::errors::ApiError;
use kbsearch_backend::llm::{ChatRequest, LlmProvider};
use kbsearch_backend::server::router::router;
use kbsearch_backend::state::AppState;

const EMBEDDING_DIM: usize = 16;

/// Deterministic keyword-bucket embeddings plus a fixed structured
/// chat reply, enough to drive the full pipeline offline.
struct ScriptedProvider;

fn embedding(text: &str) -> Vec<f32> {
    let mut vec = vec![0.0f32; EMBEDDING_DIM];
    for word in text.to_lowercase().split_whitespace() {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        vec[(hasher.finish() % EMBEDDING_DIM as u64) as usize] += 1.0;
    }
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vec {
            *x /= norm;
        }
    }
    vec
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        Ok(true)
    }

    async fn chat(&self, request: ChatRequest, _model_id: &str) -> Result<String, ApiError> {
        let prompt = &request.messages[0].content;
        if prompt.contains("completeness_score") {
            Ok(r#"{"completeness_score": 0.8, "missing_aspects": []}"#.to_string())
        } else {
            Ok(
                r#"{"answer": "Employees get 25 vacation days.", "confidence": 0.9, "missing_info": [], "enrichment_suggestions": []}"#
                    .to_string(),
            )
        }
    }

    async fn embed(&self, inputs: &[String], _model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        Ok(inputs.iter().map(|text| embedding(text)).collect())
    }
}

async fn test_app_with_settings(settings: Settings) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let paths = Arc::new(AppPaths::with_data_dir(dir.path().to_path_buf()));
    let state = AppState::build(paths, settings, Arc::new(ScriptedProvider))
        .await
        .unwrap();
    (router(state), dir)
}

async fn test_app() -> (Router, tempfile::TempDir) {
    test_app_with_settings(Settings::default()).await
}

fn multipart_request(path: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "kb-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_status() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn upload_list_search_and_delete_roundtrip() {
    let (app, _dir) = test_app().await;

    // Upload.
    let response = app
        .clone()
        .oneshot(multipart_request(
            "/upload",
            "policy.txt",
            b"Employees get 25 vacation days per year. Carry-over is capped at 5 days.",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["processing_status"], "completed");
    assert_eq!(body["filename"], "policy.txt");
    assert!(body["chunk_count"].as_u64().unwrap() >= 1);

    // List.
    let response = app
        .clone()
        .oneshot(Request::get("/documents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["filename"], "policy.txt");
    assert_eq!(body[0]["content_type"], "text/plain");

    // Search (JSON body).
    let response = app
        .clone()
        .oneshot(
            Request::post("/search-json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"query": "How many vacation days do employees get?"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "Employees get 25 vacation days.");
    assert_eq!(body["confidence_level"], "high");
    assert_eq!(body["sources"][0]["filename"], "policy.txt");
    assert!(body["processing_time"].as_f64().unwrap() >= 0.0);

    // Search (form body).
    let response = app
        .clone()
        .oneshot(
            Request::post("/search")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(
                    "query=vacation+days&include_confidence=true&include_enrichment=false",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete.
    let response = app
        .clone()
        .oneshot(
            Request::delete("/documents/policy.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again is a 404.
    let response = app
        .oneshot(
            Request::delete("/documents/policy.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_without_documents_returns_canned_answer() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::post("/search-json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"query": "anything"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["confidence"], 0.0);
    assert_eq!(body["confidence_level"], "low");
    assert_eq!(body["missing_info"][0]["type"], "document");
    assert_eq!(
        body["enrichment_suggestions"][0]["type"],
        "document_upload"
    );
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(
            Request::post("/search-json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"query": "   "}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Query cannot be empty");
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(multipart_request("/upload", "malware.exe", b"MZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("not supported"));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let settings = Settings {
        max_file_size: 64,
        ..Settings::default()
    };
    let (app, _dir) = test_app_with_settings(settings).await;

    let response = app
        .oneshot(multipart_request("/upload", "big.txt", &[b'a'; 200]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("File too large"));
}

#[tokio::test]
async fn ratings_and_stats_flow() {
    let (app, _dir) = test_app().await;

    // Out-of-range rating is rejected.
    let response = app
        .clone()
        .oneshot(
            Request::post("/rate-answer")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"query": "q", "rating": 7}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid rating is recorded.
    let response = app
        .clone()
        .oneshot(
            Request::post("/rate-answer")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"query": "q", "rating": 4, "feedback": "good"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Rating recorded successfully");
    assert_eq!(body["rating_id"], 1);

    // Listing includes it.
    let response = app
        .clone()
        .oneshot(Request::get("/ratings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["ratings"][0]["rating"], 4);

    // Stats aggregate.
    let response = app
        .oneshot(Request::get("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total_documents"], 0);
    assert_eq!(body["total_chunks"], 0);
    assert_eq!(body["total_ratings"], 1);
    assert_eq!(body["average_rating"], 4.0);
}
