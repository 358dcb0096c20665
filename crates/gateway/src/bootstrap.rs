//! AppState construction extracted from `main.rs`.

use std::sync::Arc;

use anyhow::Context;

use fd_domain::config::{Config, ConfigSeverity};
use fd_providers::ProviderRegistry;
use fd_storage::{DocumentStore, MemoryObjectStore, ObjectStore, S3ObjectStore, SuggestionStore};

use crate::auth::{DevTokenVerifier, HmacTokenVerifier, TokenVerifier};
use crate::state::AppState;

/// Validate config, initialize every subsystem and return a fully-wired
/// [`AppState`].
pub async fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let mut fatal = 0usize;
    for issue in config.validate() {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => {
                tracing::error!("config: {issue}");
                fatal += 1;
            }
        }
    }
    if fatal > 0 {
        anyhow::bail!("refusing to start: {fatal} fatal config issue(s), see log above");
    }

    // ── Object store ─────────────────────────────────────────────────
    let objects: Arc<dyn ObjectStore> = match &config.storage.bucket {
        Some(bucket) => {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = &config.storage.region {
                loader = loader.region(aws_config::Region::new(region.clone()));
            }
            let sdk_config = loader.load().await;
            let client = aws_sdk_s3::Client::new(&sdk_config);
            tracing::info!(bucket = %bucket, "S3 object store ready");
            Arc::new(S3ObjectStore::new(client, bucket))
        }
        None => {
            tracing::warn!(
                "no storage.bucket configured — using in-memory object store (dev mode, \
                 uploads are lost on restart)"
            );
            Arc::new(MemoryObjectStore::new())
        }
    };

    // ── Repositories ─────────────────────────────────────────────────
    let documents = Arc::new(DocumentStore::new(&config.storage.state_path));
    let suggestions = Arc::new(SuggestionStore::new(&config.storage.state_path));
    tracing::info!(path = %config.storage.state_path.display(), "repositories ready");

    // ── LLM providers ────────────────────────────────────────────────
    let llm = Arc::new(
        ProviderRegistry::from_config(&config.llm).context("initializing LLM providers")?,
    );

    // ── Token verifier (secret read once at startup) ─────────────────
    // Priority: config.auth.token_secret > env var (config.auth.token_secret_env)
    let verifier: Arc<dyn TokenVerifier> = {
        let env_var = &config.auth.token_secret_env;
        let secret = config
            .auth
            .token_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| ("config".to_string(), s.to_string()))
            .or_else(|| {
                std::env::var(env_var)
                    .ok()
                    .filter(|s| !s.is_empty())
                    .map(|s| (format!("env:{env_var}"), s))
            });
        match secret {
            Some((source, secret)) => {
                tracing::info!(source = %source, "HMAC token verifier enabled");
                Arc::new(HmacTokenVerifier::new(secret.into_bytes()))
            }
            None => {
                tracing::warn!(
                    "token verification DISABLED — set auth.token_secret in config.toml or \
                     {env_var} env var; the bearer token is being treated as the owner id"
                );
                Arc::new(DevTokenVerifier)
            }
        }
    };

    Ok(AppState {
        config,
        objects,
        documents,
        suggestions,
        llm,
        verifier,
    })
}
