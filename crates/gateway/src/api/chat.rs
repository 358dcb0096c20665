//! Chat API endpoint.
//!
//! - `POST /chat/chatbot` — `{message}` → `{reply}`; stateless per call

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;

use fd_domain::{Error, Owner};

use crate::api::error_response;
use crate::runtime::chat;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's live question.
    pub message: String,
}

pub async fn chatbot(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Json(body): Json<ChatRequest>,
) -> Response {
    if body.message.trim().is_empty() {
        return error_response(
            "chat.chatbot",
            Some(&owner),
            &Error::Validation("message is required".into()),
        );
    }

    match chat::ask(&state, &owner, &body.message).await {
        Ok(reply) => Json(serde_json::json!({ "reply": reply })).into_response(),
        Err(e) => error_response("chat.chatbot", Some(&owner), &e),
    }
}
