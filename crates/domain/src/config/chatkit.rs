use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Upstream ChatKit session API
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Upstream session API settings.
///
/// Secrets and deployment-specific values are named by environment
/// variable rather than stored in the file.  They are read exactly once,
/// at startup, through the `resolve_*` helpers below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatKitConfig {
    /// Environment variable holding the upstream API key (bearer token).
    #[serde(default = "d_api_key_env")]
    pub api_key_env: String,
    /// Upstream base URL, without the `/v1/...` suffix.
    #[serde(default = "d_api_base")]
    pub api_base: String,
    /// Environment variable that, when set and non-empty, overrides `api_base`.
    #[serde(default = "d_api_base_env")]
    pub api_base_env: String,
    /// Fallback workflow used when a request names none.
    #[serde(default)]
    pub workflow_id: Option<String>,
    /// Environment variables checked, in order, for a fallback workflow.
    /// The first is the primary name; the rest are legacy aliases.
    #[serde(default = "d_workflow_id_envs")]
    pub workflow_id_envs: Vec<String>,
    /// Client timeout for the upstream call.  `None` leaves it to the
    /// hosting environment.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for ChatKitConfig {
    fn default() -> Self {
        Self {
            api_key_env: d_api_key_env(),
            api_base: d_api_base(),
            api_base_env: d_api_base_env(),
            workflow_id: None,
            workflow_id_envs: d_workflow_id_envs(),
            timeout_ms: None,
        }
    }
}

impl ChatKitConfig {
    /// Read the API key.  An empty value counts as unset.
    pub fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        env(&self.api_key_env).filter(|v| !v.is_empty())
    }

    /// The effective base URL: the env override when present, else `api_base`.
    /// Trailing slashes are stripped.
    pub fn resolve_api_base(&self, env: impl Fn(&str) -> Option<String>) -> String {
        let base = env(&self.api_base_env)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.api_base.trim().to_owned());
        base.trim_end_matches('/').to_owned()
    }

    /// The process-level fallback workflow, trimmed.
    ///
    /// Environment variables win over the inline `workflow_id`, in the
    /// order listed in `workflow_id_envs`.  Values that trim to empty are
    /// skipped.
    pub fn resolve_default_workflow(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.workflow_id_envs
            .iter()
            .filter_map(|name| env(name))
            .chain(self.workflow_id.clone())
            .map(|v| v.trim().to_owned())
            .find(|v| !v.is_empty())
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn d_api_base() -> String {
    "https://api.openai.com".into()
}
fn d_api_base_env() -> String {
    "CHATKIT_API_BASE".into()
}
fn d_workflow_id_envs() -> Vec<String> {
    vec!["CHATKIT_WORKFLOW_ID".into(), "VITE_CHATKIT_WORKFLOW_ID".into()]
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn api_key_empty_counts_as_missing() {
        let cfg = ChatKitConfig::default();
        assert_eq!(cfg.resolve_api_key(env_of(&[("OPENAI_API_KEY", "")])), None);
        assert_eq!(
            cfg.resolve_api_key(env_of(&[("OPENAI_API_KEY", "sk-live")])).as_deref(),
            Some("sk-live")
        );
    }

    #[test]
    fn api_base_env_override_wins() {
        let cfg = ChatKitConfig::default();
        assert_eq!(cfg.resolve_api_base(env_of(&[])), "https://api.openai.com");
        assert_eq!(
            cfg.resolve_api_base(env_of(&[("CHATKIT_API_BASE", "http://localhost:9999/")])),
            "http://localhost:9999"
        );
        assert_eq!(
            cfg.resolve_api_base(env_of(&[("CHATKIT_API_BASE", "   ")])),
            "https://api.openai.com"
        );
    }

    #[test]
    fn primary_workflow_env_beats_legacy_alias() {
        let cfg = ChatKitConfig::default();
        let env = env_of(&[
            ("CHATKIT_WORKFLOW_ID", " wf_primary "),
            ("VITE_CHATKIT_WORKFLOW_ID", "wf_legacy"),
        ]);
        assert_eq!(cfg.resolve_default_workflow(env).as_deref(), Some("wf_primary"));
    }

    #[test]
    fn blank_primary_falls_through_to_legacy_alias() {
        let cfg = ChatKitConfig::default();
        let env = env_of(&[
            ("CHATKIT_WORKFLOW_ID", "  "),
            ("VITE_CHATKIT_WORKFLOW_ID", "wf_legacy"),
        ]);
        assert_eq!(cfg.resolve_default_workflow(env).as_deref(), Some("wf_legacy"));
    }

    #[test]
    fn inline_workflow_is_last_resort() {
        let cfg = ChatKitConfig {
            workflow_id: Some("wf_inline".into()),
            ..Default::default()
        };
        assert_eq!(
            cfg.resolve_default_workflow(env_of(&[])).as_deref(),
            Some("wf_inline")
        );
        assert_eq!(
            cfg.resolve_default_workflow(env_of(&[("CHATKIT_WORKFLOW_ID", "wf_env")]))
                .as_deref(),
            Some("wf_env")
        );
    }

    #[test]
    fn no_workflow_anywhere_is_none() {
        let cfg = ChatKitConfig::default();
        assert_eq!(cfg.resolve_default_workflow(env_of(&[])), None);
    }
}
