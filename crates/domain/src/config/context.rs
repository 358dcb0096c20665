use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Token budgets
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Input and output token budgets for every model call the gateway makes.
///
/// Input budgets use the approximate 4-bytes-per-token heuristic from
/// `fd_context::truncation` — reserved tokens are subtracted from the model
/// limit before clamping, so e.g. the chat context gets
/// `(model_token_limit - chat_reserved_tokens)` tokens of summaries and the
/// reservation covers the system persona plus the live question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "d_4096")]
    pub model_token_limit: usize,
    /// Reserved for the summarization instructions when clamping a
    /// document's text (keep-start).
    #[serde(default = "d_1024")]
    pub summary_reserved_tokens: usize,
    /// Reserved for the persona and the live question when clamping the
    /// concatenated summaries for chat (keep-end).
    #[serde(default = "d_2048")]
    pub chat_reserved_tokens: usize,
    // Output caps, per call site.
    #[serde(default = "d_300")]
    pub summary_output_tokens: u32,
    #[serde(default = "d_500")]
    pub chat_output_tokens: u32,
    #[serde(default = "d_500")]
    pub suggestion_output_tokens: u32,
    #[serde(default = "d_150")]
    pub extend_output_tokens: u32,
    #[serde(default = "d_500")]
    pub resources_output_tokens: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            model_token_limit: 4096,
            summary_reserved_tokens: 1024,
            chat_reserved_tokens: 2048,
            summary_output_tokens: 300,
            chat_output_tokens: 500,
            suggestion_output_tokens: 500,
            extend_output_tokens: 150,
            resources_output_tokens: 500,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_4096() -> usize {
    4096
}
fn d_1024() -> usize {
    1024
}
fn d_2048() -> usize {
    2048
}
fn d_300() -> u32 {
    300
}
fn d_500() -> u32 {
    500
}
fn d_150() -> u32 {
    150
}
