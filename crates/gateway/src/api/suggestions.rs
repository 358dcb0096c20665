//! Suggestion API endpoints.
//!
//! - `GET    /suggestions`     — return cached items, generating on first read
//! - `POST   /suggestions/add` — ask for one new, non-overlapping suggestion
//! - `DELETE /suggestions`     — invalidate the cache, forcing regeneration

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use fd_domain::Owner;

use crate::api::error_response;
use crate::runtime::suggest::{self, Extend};
use crate::state::AppState;

pub async fn read_or_generate(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
) -> Response {
    match suggest::read_or_generate(&state, &owner).await {
        Ok(items) => Json(serde_json::json!({ "suggestions": items })).into_response(),
        Err(e) => error_response("suggestions.get", Some(&owner), &e),
    }
}

pub async fn add(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
) -> Response {
    match suggest::extend(&state, &owner).await {
        Ok(Extend::Added(items)) => {
            Json(serde_json::json!({ "suggestions": items })).into_response()
        }
        // 200, not an error: the model simply had nothing new to offer.
        Ok(Extend::Duplicate) => Json(serde_json::json!({
            "message": "no new unique suggestion could be generated"
        }))
        .into_response(),
        Err(e) => error_response("suggestions.add", Some(&owner), &e),
    }
}

pub async fn invalidate(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
) -> Response {
    state.suggestions.delete(&owner).await;
    tracing::info!(owner = %owner, "suggestion cache cleared on request");
    Json(serde_json::json!({ "message": "suggestions refreshed" })).into_response()
}
