//! Request/reply DTOs for `POST /v1/chatkit/sessions`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Body sent upstream: `{ "workflow": { "id": ... }, "user": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub workflow: WorkflowParam,
    /// Stable visitor identifier; upstream uses it to group sessions.
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowParam {
    pub id: String,
}

impl CreateSessionRequest {
    pub fn new(workflow_id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            workflow: WorkflowParam {
                id: workflow_id.into(),
            },
            user: user.into(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Reply
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A completed upstream exchange: the status code plus the body as a JSON
/// object.  Bodies that are unreadable, not JSON, or not a JSON object are
/// normalized to `{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReply {
    pub status: u16,
    pub payload: Map<String, Value>,
}

impl SessionReply {
    pub fn new(status: u16, payload: Map<String, Value>) -> Self {
        Self { status, payload }
    }

    /// Build a reply from raw body bytes, degrading to `{}` on any parse
    /// problem.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let payload = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self { status, payload }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Upstream's error message, if it sent one.
    ///
    /// Accepts both a bare string (`{"error": "bad token"}`) and the
    /// OpenAI envelope (`{"error": {"message": "..."}}`).
    pub fn error_message(&self) -> Option<String> {
        match self.payload.get("error")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Object(obj) => obj
                .get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            _ => None,
        }
    }

    /// The issued client secret; only a non-empty string counts.
    pub fn client_secret(&self) -> Option<&str> {
        self.payload
            .get("client_secret")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Expiry hint, passed through untouched.
    pub fn expires_after(&self) -> Option<&Value> {
        self.payload.get("expires_after").filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_upstream_shape() {
        let req = CreateSessionRequest::new("wf_123", "visitor-1");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "workflow": { "id": "wf_123" }, "user": "visitor-1" })
        );
    }

    #[test]
    fn invalid_json_body_becomes_empty_object() {
        let reply = SessionReply::from_body(500, b"<html>Bad Gateway</html>");
        assert!(reply.payload.is_empty());
        assert_eq!(reply.error_message(), None);
    }

    #[test]
    fn non_object_json_becomes_empty_object() {
        assert!(SessionReply::from_body(200, b"[1,2]").payload.is_empty());
        assert!(SessionReply::from_body(200, b"null").payload.is_empty());
        assert!(SessionReply::from_body(200, b"").payload.is_empty());
    }

    #[test]
    fn error_message_bare_string() {
        let reply = SessionReply::from_body(401, br#"{"error":"bad token"}"#);
        assert_eq!(reply.error_message().as_deref(), Some("bad token"));
    }

    #[test]
    fn error_message_openai_envelope() {
        let reply = SessionReply::from_body(
            400,
            br#"{"error":{"message":"Invalid workflow","type":"invalid_request_error"}}"#,
        );
        assert_eq!(reply.error_message().as_deref(), Some("Invalid workflow"));
    }

    #[test]
    fn error_message_unusable_shapes() {
        assert_eq!(SessionReply::from_body(400, br#"{"error":""}"#).error_message(), None);
        assert_eq!(SessionReply::from_body(400, br#"{"error":42}"#).error_message(), None);
        assert_eq!(SessionReply::from_body(400, br#"{"error":{}}"#).error_message(), None);
    }

    #[test]
    fn client_secret_requires_non_empty_string() {
        let ok = SessionReply::from_body(200, br#"{"client_secret":"sk_abc"}"#);
        assert_eq!(ok.client_secret(), Some("sk_abc"));

        let bodies: [&[u8]; 4] = [
            br#"{}"#,
            br#"{"client_secret":""}"#,
            br#"{"client_secret":null}"#,
            br#"{"client_secret":17}"#,
        ];
        for body in bodies {
            assert_eq!(SessionReply::from_body(200, body).client_secret(), None);
        }
    }

    #[test]
    fn expires_after_is_passed_through() {
        let reply = SessionReply::from_body(200, br#"{"client_secret":"s","expires_after":123}"#);
        assert_eq!(reply.expires_after(), Some(&json!(123)));

        let reply = SessionReply::from_body(200, br#"{"client_secret":"s"}"#);
        assert_eq!(reply.expires_after(), None);
    }

    #[test]
    fn success_range() {
        assert!(SessionReply::new(200, Map::new()).is_success());
        assert!(SessionReply::new(201, Map::new()).is_success());
        assert!(!SessionReply::new(401, Map::new()).is_success());
        assert!(!SessionReply::new(302, Map::new()).is_success());
    }
}
