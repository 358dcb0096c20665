//! Ingestion coordinator.
//!
//! Per uploaded file: store the blob, extract a year from the filename,
//! decode the bytes as text best-effort, clamp to the summary budget
//! (keep-start), summarize, persist the record. Files in a batch run
//! concurrently and every file reports its own outcome — there is no
//! fail-fast join that could hide partial success.
//!
//! When summarization fails after the blob is stored, the record is still
//! created, just without a summary. Every blob therefore has a matching
//! record; unsummarized records contribute nothing to suggestions or chat.

use std::sync::LazyLock;

use chrono::Utc;
use futures_util::future::join_all;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use fd_context::{truncate, Keep};
use fd_context::prompts;
use fd_domain::Owner;
use fd_providers::CompletionRequest;
use fd_storage::DocumentRecord;

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Input / outcome types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One file from a multipart batch.
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-file ingestion result, reported to the caller verbatim.
#[derive(Debug, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub status: OutcomeStatus,
    /// Generic failure category; upstream detail stays in the logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Failed,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Year extraction
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A 4-digit run starting with "20", bounded by non-digits or the string
/// edges. First match wins.
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(20[0-9]{2})(?:[^0-9]|$)").expect("year pattern is valid")
});

pub fn extract_year(filename: &str) -> Option<i32> {
    YEAR_PATTERN
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Batch ingestion
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Run a batch of files through the pipeline. The owner's suggestion
/// cache is invalidated before any per-file work starts, so a cache
/// generated against the old document set can never be served again.
pub async fn ingest(state: &AppState, owner: &Owner, files: Vec<FileUpload>) -> Vec<FileOutcome> {
    if state.suggestions.delete(owner).await {
        tracing::info!(owner = %owner, "suggestion cache invalidated by ingestion");
    }

    join_all(files.into_iter().map(|file| ingest_one(state, owner, file))).await
}

async fn ingest_one(state: &AppState, owner: &Owner, file: FileUpload) -> FileOutcome {
    let FileUpload { name, bytes } = file;
    let storage_key = format!("{}/{}", owner.as_str(), name);

    // Best-effort text decode; binary formats degrade to mojibake the
    // model simply gets less out of.
    let text = String::from_utf8_lossy(&bytes).into_owned();

    if let Err(e) = state.objects.put(&storage_key, bytes).await {
        tracing::error!(owner = %owner, file = %name, error = %e, "blob store write failed");
        return FileOutcome {
            file: name,
            status: OutcomeStatus::Failed,
            error: Some("storage failed".into()),
        };
    }

    let year = extract_year(&name);

    let budgets = &state.config.context;
    let clamped = truncate(
        &text,
        budgets.model_token_limit,
        budgets.summary_reserved_tokens,
        Keep::Start,
    );

    let request = CompletionRequest {
        messages: prompts::summarize_messages(&name, clamped),
        max_tokens: Some(budgets.summary_output_tokens),
        ..Default::default()
    };

    let (summary, failure) = match state.llm.chat().complete(request).await {
        Ok(response) => (Some(response.content), None),
        Err(e) => {
            tracing::error!(owner = %owner, file = %name, error = %e, "summarization failed");
            (None, Some("summarization failed".to_string()))
        }
    };

    let record = DocumentRecord {
        id: Uuid::new_v4(),
        owner: owner.clone(),
        storage_key,
        display_name: name.clone(),
        uploaded_at: Utc::now(),
        summary,
        year,
        document_type: None,
    };
    state.documents.insert(record).await;

    match failure {
        None => {
            tracing::info!(owner = %owner, file = %name, year = ?year, "document ingested");
            FileOutcome {
                file: name,
                status: OutcomeStatus::Ok,
                error: None,
            }
        }
        Some(error) => FileOutcome {
            file: name,
            status: OutcomeStatus::Failed,
            error: Some(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounded_by_underscores() {
        assert_eq!(extract_year("W2_2023_final.txt"), Some(2023));
    }

    #[test]
    fn no_year_in_plain_names() {
        assert_eq!(extract_year("report.txt"), None);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(extract_year("99_2024_2025.txt"), Some(2024));
    }

    #[test]
    fn year_at_string_edges() {
        assert_eq!(extract_year("2023"), Some(2023));
        assert_eq!(extract_year("tax-2021"), Some(2021));
        assert_eq!(extract_year("2022.pdf"), Some(2022));
    }

    #[test]
    fn digit_runs_longer_than_four_do_not_match() {
        assert_eq!(extract_year("scan_20233.pdf"), None);
        assert_eq!(extract_year("120234.pdf"), None);
    }

    #[test]
    fn years_outside_the_2000s_do_not_match() {
        assert_eq!(extract_year("archive_1999.pdf"), None);
        assert_eq!(extract_year("form_2100.pdf"), None);
    }
}
