use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Visitor identity cookie
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Controls the `Secure` attribute on the visitor identity cookie.
///
/// The cookie name, lifetime and remaining attributes are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Environment variables that mark a production deployment.  If any of
    /// them equals `production`, cookies are issued with `Secure`.
    #[serde(default = "d_production_envs")]
    pub production_envs: Vec<String>,
    /// Explicit override for the `Secure` attribute.
    #[serde(default)]
    pub secure: Option<bool>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            production_envs: d_production_envs(),
            secure: None,
        }
    }
}

impl CookieConfig {
    pub fn resolve_secure(&self, env: impl Fn(&str) -> Option<String>) -> bool {
        if let Some(secure) = self.secure {
            return secure;
        }
        self.production_envs
            .iter()
            .any(|name| env(name).as_deref() == Some("production"))
    }
}

fn d_production_envs() -> Vec<String> {
    vec!["NODE_ENV".into(), "ENVIRONMENT".into()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_production_env_enables_secure() {
        let cfg = CookieConfig::default();
        assert!(cfg.resolve_secure(|k| (k == "NODE_ENV").then(|| "production".to_string())));
        assert!(cfg.resolve_secure(|k| (k == "ENVIRONMENT").then(|| "production".to_string())));
    }

    #[test]
    fn other_values_do_not_enable_secure() {
        let cfg = CookieConfig::default();
        assert!(!cfg.resolve_secure(|_| None));
        assert!(!cfg.resolve_secure(|_| Some("development".to_string())));
        assert!(!cfg.resolve_secure(|_| Some("Production".to_string())));
    }

    #[test]
    fn explicit_override_ignores_env() {
        let cfg = CookieConfig {
            secure: Some(true),
            ..Default::default()
        };
        assert!(cfg.resolve_secure(|_| None));

        let cfg = CookieConfig {
            secure: Some(false),
            ..Default::default()
        };
        assert!(!cfg.resolve_secure(|_| Some("production".to_string())));
    }
}
