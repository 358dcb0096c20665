//! Chat context assembler.
//!
//! Builds a bounded, stateless 3-message exchange from the owner's
//! summaries plus the live question. Summaries are clamped keep-end —
//! for chat, the most recently ingested material matters most.

use fd_context::prompts;
use fd_context::{truncate, Keep};
use fd_domain::error::Result;
use fd_domain::Owner;
use fd_providers::CompletionRequest;

use crate::state::AppState;

/// Answer a live question against the owner's summaries. No conversation
/// history is retained across calls. An owner with no summarized
/// documents still gets an answer — just one grounded in nothing.
pub async fn ask(state: &AppState, owner: &Owner, question: &str) -> Result<String> {
    let summaries = state.documents.summaries(owner).await.join("\n\n");

    let budgets = &state.config.context;
    let clamped = truncate(
        &summaries,
        budgets.model_token_limit,
        budgets.chat_reserved_tokens,
        Keep::End,
    );

    let request = CompletionRequest {
        messages: prompts::chat_messages(clamped, question),
        max_tokens: Some(budgets.chat_output_tokens),
        ..Default::default()
    };
    let response = state.llm.chat().complete(request).await?;

    tracing::info!(owner = %owner, reply_bytes = response.content.len(), "chat reply produced");
    Ok(response.content)
}
