//! API authentication middleware.
//!
//! Extracts the `Authorization: Bearer <token>` header, resolves it to an
//! [`Owner`] through the injected [`crate::auth::TokenVerifier`], and makes
//! the owner available to handlers as a request extension. Missing token →
//! 401; failed verification → 403.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::api_error;
use crate::state::AppState;

/// Axum middleware that resolves the request's owner on protected routes.
/// Attach via `axum::middleware::from_fn_with_state`.
pub async fn require_owner(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return api_error(axum::http::StatusCode::UNAUTHORIZED, "access token missing");
    };

    match state.verifier.verify(token) {
        Ok(owner) => {
            req.extensions_mut().insert(owner);
            next.run(req).await
        }
        Err(reason) => {
            tracing::debug!(?reason, "token verification failed");
            api_error(
                axum::http::StatusCode::FORBIDDEN,
                "invalid or expired token",
            )
        }
    }
}
