//! Resource-link lookup.
//!
//! - `POST /resources` — `{topic}` → `{answer}` (five numbered links)
//!
//! Served by the search-oriented provider role, not the chat role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use fd_context::prompts;
use fd_providers::CompletionRequest;

use crate::api::{api_error, error_response};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResourceRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

pub async fn lookup(
    State(state): State<AppState>,
    Json(body): Json<ResourceRequest>,
) -> Response {
    let topic = body
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let Some(topic) = topic else {
        return api_error(StatusCode::BAD_REQUEST, "topic is required");
    };

    let provider = match state.llm.search() {
        Ok(p) => p,
        Err(e) => return error_response("resources.lookup", None, &e),
    };

    let request = CompletionRequest {
        messages: prompts::resource_messages(topic),
        max_tokens: Some(state.config.context.resources_output_tokens),
        ..Default::default()
    };

    match provider.complete(request).await {
        Ok(response) => {
            Json(serde_json::json!({ "answer": response.content })).into_response()
        }
        Err(e) => error_response("resources.lookup", None, &e),
    }
}
