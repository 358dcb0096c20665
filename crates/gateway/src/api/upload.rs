//! Upload API endpoint — the entry point of the ingestion pipeline.
//!
//! - `POST /upload` — multipart `documents` field(s) → per-file outcomes

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use fd_domain::Owner;

use crate::api::api_error;
use crate::runtime::ingest::{self, FileUpload};
use crate::state::AppState;

/// Accept a multipart batch of files and run each through the ingestion
/// pipeline. The response always carries one outcome per file — a single
/// file's failure never masks the others.
pub async fn upload(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    mut multipart: Multipart,
) -> Response {
    let mut files: Vec<FileUpload> = Vec::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                // Only the `documents` field carries files; ignore the rest.
                if field.name() != Some("documents") {
                    continue;
                }
                let Some(name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                match field.bytes().await {
                    Ok(bytes) => files.push(FileUpload {
                        name,
                        bytes: bytes.to_vec(),
                    }),
                    Err(e) => {
                        tracing::warn!(owner = %owner, error = %e, "multipart field read failed");
                        return api_error(StatusCode::BAD_REQUEST, "malformed multipart upload");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(owner = %owner, error = %e, "multipart decode failed");
                return api_error(StatusCode::BAD_REQUEST, "malformed multipart upload");
            }
        }
    }

    if files.is_empty() {
        return api_error(
            StatusCode::BAD_REQUEST,
            "no files found in the 'documents' field",
        );
    }

    let results = ingest::ingest(&state, &owner, files).await;
    Json(serde_json::json!({ "results": results })).into_response()
}
