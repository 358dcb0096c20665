//! HTTP-surface tests: auth gating, input validation, and status mapping,
//! driven through the real router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use fd_domain::config::Config;
use fd_domain::error::Result;
use fd_providers::{CompletionRequest, CompletionResponse, LlmProvider, ProviderRegistry};
use fd_storage::{DocumentStore, MemoryObjectStore, SuggestionStore};

use fd_gateway::api;
use fd_gateway::auth::DevTokenVerifier;
use fd_gateway::state::AppState;

struct StubProvider;

#[async_trait::async_trait]
impl LlmProvider for StubProvider {
    async fn complete(&self, _req: CompletionRequest) -> Result<CompletionResponse> {
        Ok(CompletionResponse {
            content: "stub".into(),
            model: "stub".into(),
        })
    }

    fn provider_id(&self) -> &str {
        "stub"
    }
}

fn test_app() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState {
        config: Arc::new(Config::default()),
        objects: Arc::new(MemoryObjectStore::new()),
        documents: Arc::new(DocumentStore::new(dir.path())),
        suggestions: Arc::new(SuggestionStore::new(dir.path())),
        llm: Arc::new(ProviderRegistry::new(Arc::new(StubProvider), None)),
        verifier: Arc::new(DevTokenVerifier),
    };
    (api::router(state.clone()).with_state(state), dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", "Bearer alice")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn healthz_needs_no_auth() {
    let (app, _dir) = test_app();
    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_reject_missing_tokens() {
    for uri in ["/suggestions", "/documents"] {
        let (app, _dir) = test_app();
        let response = app.oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn suggestions_without_documents_is_a_client_error() {
    let (app, _dir) = test_app();
    let response = app.oneshot(authed_get("/suggestions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsafe_search_input_is_rejected_before_filtering() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(authed_get("/documents?search=$where"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plain_listing_is_ok_and_empty_for_a_fresh_owner() {
    let (app, _dir) = test_app();
    let response = app.oneshot(authed_get("/documents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn download_of_a_foreign_or_missing_document_is_not_found() {
    let (app, _dir) = test_app();
    let response = app
        .oneshot(authed_get(
            "/documents/download/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resources_requires_a_topic() {
    let (app, _dir) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/resources")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"topic": "  "}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resources_without_a_search_provider_is_a_server_error() {
    let (app, _dir) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/resources")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"topic": "budgeting"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn suggestion_invalidation_always_succeeds() {
    let (app, _dir) = test_app();
    let request = Request::builder()
        .method("DELETE")
        .uri("/suggestions")
        .header("authorization", "Bearer alice")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
