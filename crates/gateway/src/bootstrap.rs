//! AppState construction shared by `serve` and the integration tests.
//!
//! This is the only place the broker reads its environment.  Everything a
//! request needs is resolved here and carried in [`BrokerSettings`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use ck_chatkit::RestSessionClient;
use ck_domain::config::{Config, ConfigSeverity};

use crate::state::{AppState, BrokerSettings};

/// Environment lookup backed by the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve the environment-derived settings for `config`.
pub fn resolve_settings(config: &Config, env: impl Fn(&str) -> Option<String>) -> BrokerSettings {
    BrokerSettings {
        api_key: config.chatkit.resolve_api_key(&env),
        api_key_env: config.chatkit.api_key_env.clone(),
        api_base: config.chatkit.resolve_api_base(&env),
        default_workflow_id: config.chatkit.resolve_default_workflow(&env),
        secure_cookies: config.cookie.resolve_secure(&env),
    }
}

/// Validate config, resolve settings from `env` and return a fully-wired
/// [`AppState`].
pub fn build_app_state(
    config: Arc<Config>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<AppState> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    if issues.iter().any(|i| i.severity == ConfigSeverity::Error) {
        anyhow::bail!(
            "config validation failed with {} error(s)",
            issues
                .iter()
                .filter(|i| i.severity == ConfigSeverity::Error)
                .count()
        );
    }

    // ── Environment-derived settings ─────────────────────────────────
    let settings = resolve_settings(&config, env);
    if settings.api_key.is_none() {
        tracing::warn!(
            env = %settings.api_key_env,
            "upstream API key not set; session requests will fail with 500"
        );
    }
    match &settings.default_workflow_id {
        Some(wf) => tracing::info!(workflow_id = %wf, "fallback workflow configured"),
        None => tracing::info!("no fallback workflow; requests must name one"),
    }
    tracing::info!(secure_cookies = settings.secure_cookies, "identity cookie policy");

    // ── Upstream client ──────────────────────────────────────────────
    let timeout = config.chatkit.timeout_ms.map(Duration::from_millis);
    let client = RestSessionClient::new(&settings.api_base, timeout)
        .context("creating ChatKit session client")?;
    tracing::info!(
        url = %settings.api_base,
        timeout_ms = ?config.chatkit.timeout_ms,
        "ChatKit session client ready"
    );

    Ok(AppState {
        config,
        settings: Arc::new(settings),
        sessions: Arc::new(client),
    })
}
