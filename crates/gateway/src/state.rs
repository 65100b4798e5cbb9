use std::sync::Arc;

use ck_chatkit::SessionApi;
use ck_domain::config::Config;

/// Values derived from the process environment, resolved once at startup.
///
/// Request handlers read these instead of the environment so that every
/// request in a process sees the same credential, fallback workflow and
/// cookie policy.
#[derive(Clone)]
pub struct BrokerSettings {
    /// Upstream bearer token. `None` makes every session request fail
    /// with 500 instead of refusing to boot.
    pub api_key: Option<String>,
    /// Name of the variable the key is read from, for error messages.
    pub api_key_env: String,
    /// Effective upstream base URL.
    pub api_base: String,
    /// Trimmed, non-empty fallback workflow.
    pub default_workflow_id: Option<String>,
    /// Append `Secure` to identity cookies.
    pub secure_cookies: bool,
}

impl std::fmt::Debug for BrokerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("api_base", &self.api_base)
            .field("default_workflow_id", &self.default_workflow_id)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub settings: Arc<BrokerSettings>,
    /// Upstream session API (REST in production, swappable in tests).
    pub sessions: Arc<dyn SessionApi>,
}
