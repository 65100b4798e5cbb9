use serde::Serialize;

/// Structured trace events emitted across the broker crates.
///
/// Never carries the upstream API key or an issued client secret.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    UpstreamSessionCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    VisitorMinted {
        visitor_id: String,
    },
    SessionBrokered {
        workflow_id: String,
        new_visitor: bool,
        status: u16,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ck_event");
    }
}
