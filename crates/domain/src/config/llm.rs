use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM providers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The two model roles the gateway talks to.
///
/// `chat` handles summarization, suggestion generation, and the chat
/// assistant. `search` is the optional search-oriented endpoint behind the
/// resource-link route; it speaks the same OpenAI-compatible wire format
/// with its own base URL and model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "d_chat_provider")]
    pub chat: ProviderConfig,
    #[serde(default)]
    pub search: Option<ProviderConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            chat: d_chat_provider(),
            search: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub base_url: String,
    #[serde(default)]
    pub auth: ProviderAuth,
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderAuth {
    /// Env var containing the API key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_chat_provider() -> ProviderConfig {
    ProviderConfig {
        id: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        auth: ProviderAuth {
            env: Some("OPENAI_API_KEY".into()),
            key: None,
        },
        default_model: Some("gpt-4o-mini".into()),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
