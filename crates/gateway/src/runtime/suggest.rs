//! Suggestion engine — the per-owner cache state machine.
//!
//! Two states, `Absent` and `Present`. A read generates only from
//! `Absent`; a present cache is returned unchanged with no model call.
//! Extension asks for exactly one new item and rejects byte-identical
//! repeats. Invalidation (explicit, or implicit on ingestion) is the only
//! path back to `Absent`.
//!
//! There is deliberately no per-owner lock here: two concurrent reads of
//! an absent cache can both call the model, and the storage upsert makes
//! the outcome last-writer-wins. See DESIGN.md.

use fd_context::prompts;
use fd_domain::error::{Error, Result};
use fd_domain::Owner;
use fd_providers::CompletionRequest;

use crate::state::AppState;

/// Outcome of an extension request.
#[derive(Debug, PartialEq, Eq)]
pub enum Extend {
    /// The new item was appended; carries the full updated list.
    Added(Vec<String>),
    /// The model produced a byte-identical repeat; cache untouched.
    Duplicate,
}

/// Concatenated summaries of every summarized document, natural order.
/// Errors with [`Error::NoDocuments`] when the owner has none.
async fn summaries_text(state: &AppState, owner: &Owner) -> Result<String> {
    let summaries = state.documents.summaries(owner).await;
    if summaries.is_empty() {
        return Err(Error::NoDocuments);
    }
    Ok(summaries.join("\n\n"))
}

/// Split a model reply into one suggestion per non-empty line.
fn split_items(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Read-or-generate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn read_or_generate(state: &AppState, owner: &Owner) -> Result<Vec<String>> {
    if let Some(entry) = state.suggestions.get(owner).await {
        return Ok(entry.items);
    }

    let summaries = summaries_text(state, owner).await?;

    let request = CompletionRequest {
        messages: prompts::generation_messages(&summaries),
        max_tokens: Some(state.config.context.suggestion_output_tokens),
        ..Default::default()
    };
    let response = state.llm.chat().complete(request).await?;
    let items = split_items(&response.content);

    let entry = state.suggestions.replace(owner, items).await;
    tracing::info!(owner = %owner, count = entry.items.len(), "suggestions generated");
    Ok(entry.items)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Extend
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Ask for one suggestion that does not overlap the existing list. Dedup
/// is exact byte equality only — semantic overlap is the prompt's job,
/// and uniqueness here is advisory, not safety-critical.
pub async fn extend(state: &AppState, owner: &Owner) -> Result<Extend> {
    let existing = state
        .suggestions
        .get(owner)
        .await
        .map(|entry| entry.items)
        .unwrap_or_default();

    let summaries = summaries_text(state, owner).await?;

    let request = CompletionRequest {
        messages: prompts::extension_messages(&existing, &summaries),
        max_tokens: Some(state.config.context.extend_output_tokens),
        ..Default::default()
    };
    let response = state.llm.chat().complete(request).await?;
    let candidate = response.content.trim().to_string();

    if candidate.is_empty() {
        return Err(Error::Provider {
            provider: state.llm.chat().provider_id().to_string(),
            message: "empty completion for suggestion extension".into(),
        });
    }

    match state.suggestions.append_unique(owner, candidate).await {
        Some(entry) => {
            tracing::info!(owner = %owner, count = entry.items.len(), "suggestion added");
            Ok(Extend::Added(entry.items))
        }
        None => {
            tracing::info!(owner = %owner, "model repeated an existing suggestion");
            Ok(Extend::Duplicate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_items_drops_blank_lines_and_trims() {
        let reply = "1. Save more.\n\n  2. Spend less.  \n\n";
        assert_eq!(
            split_items(reply),
            vec!["1. Save more.".to_string(), "2. Spend less.".to_string()]
        );
    }

    #[test]
    fn split_items_of_empty_reply_is_empty() {
        assert!(split_items("").is_empty());
        assert!(split_items("\n\n").is_empty());
    }
}
