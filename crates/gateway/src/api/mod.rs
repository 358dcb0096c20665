pub mod auth;
pub mod chat;
pub mod documents;
pub mod resources;
pub mod suggestions;
pub mod upload;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use fd_domain::{Error, Owner};

use crate::state::AppState;

/// Build the full API router.
///
/// Routes are split into **public** (health probe, resource lookup) and
/// **protected** (everything owner-scoped, gated behind the bearer-token
/// middleware).
///
/// `state` is needed to wire up the auth middleware at build time.
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/resources", post(resources::lookup));

    let protected = Router::new()
        // Ingestion
        .route("/upload", post(upload::upload))
        // Documents
        .route("/documents", get(documents::list))
        .route("/documents/download/:id", get(documents::download))
        .route("/documents/:id", delete(documents::remove))
        // Suggestions
        .route("/suggestions", get(suggestions::read_or_generate))
        .route("/suggestions", delete(suggestions::invalidate))
        .route("/suggestions/add", post(suggestions::add))
        // Chat
        .route("/chat/chatbot", post(chat::chatbot))
        // Apply owner-token auth middleware to all protected routes.
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_owner,
        ));

    public.merge(protected)
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build a standardized JSON error response: `{ "error": "<message>" }`.
pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Log a failed operation with owner context and map the domain error to
/// an HTTP response. Client errors surface their own message; everything
/// upstream collapses to a generic body so internal detail never leaks.
pub(crate) fn error_response(operation: &str, owner: Option<&Owner>, err: &Error) -> Response {
    let owner = owner.map(Owner::as_str).unwrap_or("-");
    tracing::error!(operation, owner, error = %err, "request failed");

    match err {
        Error::Validation(_) | Error::NoDocuments => {
            api_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Error::NotFound => api_error(StatusCode::NOT_FOUND, "not found"),
        Error::Auth(_) => api_error(StatusCode::FORBIDDEN, "forbidden"),
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
    }
}
