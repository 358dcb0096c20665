//! Document listing, download, and deletion.
//!
//! - `GET    /documents?year&month&search` — filtered, newest-first list
//! - `GET    /documents/download/:id`      — time-limited retrieval link
//! - `DELETE /documents/:id`               — delete blob, then record

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use fd_domain::{Error, Owner};
use fd_storage::DocumentFilter;

use crate::api::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Characters with meaning to pattern-matching engines are rejected
/// outright rather than passed through — the current substring matcher is
/// inert, but the guard keeps a future storage swap from turning search
/// input into a query pattern.
fn search_is_unsafe(search: &str) -> bool {
    search.chars().any(|c| matches!(c, '$' | '\\'))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /documents
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Query(query): Query<ListQuery>,
) -> Response {
    if let Some(search) = &query.search {
        if search_is_unsafe(search) {
            return error_response(
                "documents.list",
                Some(&owner),
                &Error::Validation("search must not contain '$' or '\\'".into()),
            );
        }
    }

    let filter = DocumentFilter {
        year: query.year,
        month: query.month,
        search: query.search,
    };

    match state.documents.list_filtered(&owner, &filter).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => error_response("documents.list", Some(&owner), &e),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /documents/download/:id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn download(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(document) = state.documents.get_owned(&owner, &id).await else {
        return error_response("documents.download", Some(&owner), &Error::NotFound);
    };

    let expiry = Duration::from_secs(state.config.storage.presign_expiry_secs);
    match state.objects.presign_get(&document.storage_key, expiry).await {
        Ok(url) => Json(serde_json::json!({ "url": url })).into_response(),
        Err(e) => error_response("documents.download", Some(&owner), &e),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DELETE /documents/:id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Blob first, record second: a failure in between leaves a record whose
/// blob is gone, which a retried delete can still clean up. The reverse
/// order would strand an unreachable blob.
pub async fn remove(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(document) = state.documents.get_owned(&owner, &id).await else {
        return error_response("documents.delete", Some(&owner), &Error::NotFound);
    };

    if let Err(e) = state.objects.delete(&document.storage_key).await {
        return error_response("documents.delete", Some(&owner), &e);
    }

    match state.documents.delete(&owner, &id).await {
        Some(removed) => {
            tracing::info!(owner = %owner, file = %removed.display_name, "document deleted");
            Json(serde_json::json!({ "message": "document deleted" })).into_response()
        }
        None => error_response("documents.delete", Some(&owner), &Error::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_and_backslash_are_unsafe() {
        assert!(search_is_unsafe("$where"));
        assert!(search_is_unsafe("w2\\d"));
        assert!(search_is_unsafe("middle$dollar"));
    }

    #[test]
    fn ordinary_search_terms_are_safe() {
        assert!(!search_is_unsafe("W2 2023"));
        assert!(!search_is_unsafe("receipt (1).pdf"));
        assert!(!search_is_unsafe(""));
    }
}
