use std::sync::Arc;

use fd_domain::config::Config;
use fd_providers::ProviderRegistry;
use fd_storage::{DocumentStore, ObjectStore, SuggestionStore};

use crate::auth::TokenVerifier;

/// Shared application state passed to all API handlers.
///
/// Every collaborator is an explicitly constructed, injected singleton —
/// built once in [`crate::bootstrap::build_app_state`], never ambient
/// module state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    // ── Storage ───────────────────────────────────────────────────────
    /// Blob store for the raw uploaded bytes.
    pub objects: Arc<dyn ObjectStore>,
    /// Per-user document records (metadata + summary).
    pub documents: Arc<DocumentStore>,
    /// Per-user cached suggestion lists.
    pub suggestions: Arc<SuggestionStore>,

    // ── Upstream models ───────────────────────────────────────────────
    pub llm: Arc<ProviderRegistry>,

    // ── Auth boundary ─────────────────────────────────────────────────
    /// Resolves bearer tokens to owners. Token issuance lives elsewhere.
    pub verifier: Arc<dyn TokenVerifier>,
}
