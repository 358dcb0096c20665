use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Auth boundary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Configuration for the bearer-token verifier at the auth boundary.
///
/// Token issuance lives outside this service; the gateway only verifies
/// `<owner>.<hex hmac-sha256 tag>` tokens against the shared secret. When
/// no secret is configured the server falls back to a dev-mode verifier
/// that treats the raw bearer token as the owner identifier and logs a
/// loud warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable holding the shared HMAC secret.
    #[serde(default = "d_token_secret_env")]
    pub token_secret_env: String,
    /// Direct secret (for config-only setups; prefer the env var).
    #[serde(default)]
    pub token_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret_env: d_token_secret_env(),
            token_secret: None,
        }
    }
}

fn d_token_secret_env() -> String {
    "FINDOC_TOKEN_SECRET".into()
}
