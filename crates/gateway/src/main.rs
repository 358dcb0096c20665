use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use clap::Parser;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use fd_domain::config::Config;
use fd_gateway::cli::{Cli, Command, ConfigCommand};
use fd_gateway::{api, bootstrap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Default to serve when no subcommand is given.
        None | Some(Command::Serve) => {
            let (config, _config_path) = fd_gateway::cli::load_config()?;
            init_tracing();
            run_server(Arc::new(config)).await
        }
        Some(Command::Config(ConfigCommand::Validate)) => {
            let (config, config_path) = fd_gateway::cli::load_config()?;
            let valid = fd_gateway::cli::validate(&config, &config_path);
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Show)) => {
            let (config, _config_path) = fd_gateway::cli::load_config()?;
            fd_gateway::cli::show(&config);
            Ok(())
        }
        Some(Command::Version) => {
            println!("findoc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Initialize structured JSON tracing for the server.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fd_gateway=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer().json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Start the server with the given configuration.
async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    tracing::info!("findoc starting");

    // ── Build shared state ───────────────────────────────────────────
    let state = bootstrap::build_app_state(config.clone()).await?;

    // ── CORS layer (config-aware) ────────────────────────────────────
    let cors_layer = cors_layer_from_config(&config.server.cors);

    // ── Concurrency limit (backpressure protection) ──────────────────
    let max_concurrent = std::env::var("FINDOC_MAX_CONCURRENT_REQUESTS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(256);
    tracing::info!(max_concurrent, "concurrency limit set");

    // ── Rate-limit layer (per-IP token bucket via governor) ──────────
    let governor_layer = config.server.rate_limit.as_ref().map(|rl| {
        use tower_governor::governor::GovernorConfigBuilder;
        use tower_governor::GovernorLayer;

        let gov_config = GovernorConfigBuilder::default()
            .per_second(rl.requests_per_second)
            .burst_size(rl.burst_size)
            .finish()
            .expect("rate_limit: requests_per_second and burst_size must be > 0");

        tracing::info!(
            requests_per_second = rl.requests_per_second,
            burst_size = rl.burst_size,
            "per-IP rate limiting enabled"
        );

        GovernorLayer {
            config: std::sync::Arc::new(gov_config),
        }
    });
    if governor_layer.is_none() {
        tracing::info!("per-IP rate limiting disabled (no [server.rate_limit] in config)");
    }

    // ── Router ───────────────────────────────────────────────────────
    let router = api::router(state.clone())
        .layer(cors_layer)
        .layer(tower::limit::ConcurrencyLimitLayer::new(max_concurrent));
    let app = if let Some(gov) = governor_layer {
        router.layer(gov).with_state(state)
    } else {
        router.with_state(state)
    };

    // ── Bind ─────────────────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    tracing::info!(addr = %addr, "findoc listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("axum server error")?;

    // Repositories write through on every mutation, so there is nothing
    // left to flush here.
    tracing::info!("shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM, then return to trigger graceful shutdown
/// of the Axum server.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");

        tokio::select! {
            _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
            _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        tracing::info!("received SIGINT, shutting down");
    }
}

/// One compiled entry from `server.cors.allowed_origins`.
///
/// An entry ending in `:*` (e.g. `http://localhost:*`) accepts any
/// numeric port on that scheme+host; every other entry must match the
/// request origin verbatim.
enum OriginRule {
    Exact(String),
    AnyPort(String),
}

fn compile_origin_rules(entries: &[String]) -> Vec<OriginRule> {
    entries
        .iter()
        .map(|entry| match entry.strip_suffix(":*") {
            Some(scheme_host) => OriginRule::AnyPort(format!("{scheme_host}:")),
            None => OriginRule::Exact(entry.clone()),
        })
        .collect()
}

fn origin_allowed(rules: &[OriginRule], origin: &str) -> bool {
    rules.iter().any(|rule| match rule {
        OriginRule::Exact(allowed) => allowed == origin,
        OriginRule::AnyPort(prefix) => origin
            .strip_prefix(prefix.as_str())
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
    })
}

/// Build the CORS layer for the browser extension and local frontends.
///
/// The API only serves GET, POST, and DELETE, so only those methods are
/// offered. Origin rules come from config; a `"*"` entry disables origin
/// checking entirely, which is meant for development and cannot be
/// combined with credentials.
fn cors_layer_from_config(cors: &fd_domain::config::CorsConfig) -> CorsLayer {
    use axum::http::header;

    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION];

    if cors.allowed_origins.iter().any(|entry| entry == "*") {
        tracing::warn!("CORS origin checking is OFF (\"*\" in allowed_origins)");
        return CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let rules = compile_origin_rules(&cors.allowed_origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().is_ok_and(|origin| origin_allowed(&rules, origin))
        }))
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_for(entries: &[&str]) -> Vec<OriginRule> {
        let owned: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        compile_origin_rules(&owned)
    }

    #[test]
    fn exact_origins_match_verbatim_only() {
        let rules = rules_for(&["https://app.example.com"]);
        assert!(origin_allowed(&rules, "https://app.example.com"));
        assert!(!origin_allowed(&rules, "https://app.example.com.evil.io"));
        assert!(!origin_allowed(&rules, "http://app.example.com"));
    }

    #[test]
    fn any_port_rule_accepts_numeric_ports_only() {
        let rules = rules_for(&["http://localhost:*"]);
        assert!(origin_allowed(&rules, "http://localhost:3000"));
        assert!(origin_allowed(&rules, "http://localhost:5001"));
        assert!(!origin_allowed(&rules, "http://localhost:"));
        assert!(!origin_allowed(&rules, "http://localhost:3000x"));
        assert!(!origin_allowed(&rules, "http://localhost"));
        assert!(!origin_allowed(&rules, "http://localhost.evil.io:3000"));
    }

    #[test]
    fn exact_and_any_port_rules_combine() {
        let rules = rules_for(&["https://app.example.com", "http://127.0.0.1:*"]);
        assert!(origin_allowed(&rules, "https://app.example.com"));
        assert!(origin_allowed(&rules, "http://127.0.0.1:8080"));
        assert!(!origin_allowed(&rules, "http://192.168.0.1:8080"));
    }
}
