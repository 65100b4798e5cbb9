//! Session broker: `POST /create-session`.
//!
//! Exchanges the server-held API key and a workflow id for a short-lived
//! ChatKit client secret, tying the session to the visitor's identity
//! cookie.  The upstream reply is relayed; nothing is stored.
//!
//! | Upstream outcome                      | Response                                   |
//! |---------------------------------------|--------------------------------------------|
//! | call never completes                  | 502 `Failed to reach ChatKit API: <msg>`   |
//! | non-2xx                               | same status, upstream `error` or default   |
//! | 2xx without `client_secret`           | 502 `Missing client secret in response`    |
//! | 2xx with `client_secret`              | 200 `{client_secret, expires_after}`       |

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use serde_json::Value;

use ck_chatkit::{CreateSessionRequest, SessionApi};
use ck_domain::trace::TraceEvent;

use crate::cookie;
use crate::error::BrokerError;
use crate::identity;
use crate::state::AppState;
use crate::workflow::resolve_workflow_id;

/// Fallback message when upstream fails without saying why.
const DEFAULT_UPSTREAM_ERROR: &str = "Failed to create session";

/// Credential relayed to the browser; the secret is never inspected.
#[derive(Debug, Serialize)]
pub struct SessionCredential {
    pub client_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_after: Option<Value>,
}

/// Handler for every method on the session route.
///
/// `OPTIONS` is answered with an empty 200 for preflight; anything other
/// than `POST` gets 405.
pub async fn create_session(
    State(state): State<AppState>,
    method: Method,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return BrokerError::MethodNotAllowed.into_response();
    }

    let settings = &state.settings;

    let Some(api_key) = settings.api_key.as_deref() else {
        tracing::error!(env = %settings.api_key_env, "session request without upstream API key");
        return BrokerError::MissingApiKey {
            env: settings.api_key_env.clone(),
        }
        .into_response();
    };

    let payload = parse_body(&body);
    let Some(workflow_id) =
        resolve_workflow_id(payload.as_ref(), settings.default_workflow_id.as_deref())
    else {
        return BrokerError::MissingWorkflow.into_response();
    };

    let visitor = identity::resolve(&jar);

    let outcome = request_credential(
        state.sessions.as_ref(),
        api_key,
        &workflow_id,
        &visitor.visitor_id,
    )
    .await;

    let mut resp = match outcome {
        Ok(credential) => (StatusCode::OK, Json(credential)).into_response(),
        Err(e) => {
            tracing::warn!(workflow_id = %workflow_id, error = %e, "session creation failed");
            e.into_response()
        }
    };

    TraceEvent::SessionBrokered {
        workflow_id,
        new_visitor: visitor.is_new(),
        status: resp.status().as_u16(),
    }
    .emit();

    cookie::attach(
        &mut resp,
        visitor.cookie_to_set.as_deref(),
        settings.secure_cookies,
    );
    resp
}

/// Call upstream once and map its reply to a credential or a [`BrokerError`].
pub async fn request_credential(
    sessions: &dyn SessionApi,
    api_key: &str,
    workflow_id: &str,
    visitor_id: &str,
) -> Result<SessionCredential, BrokerError> {
    let req = CreateSessionRequest::new(workflow_id, visitor_id);
    let reply = sessions
        .create_session(api_key, &req)
        .await
        .map_err(|e| BrokerError::Unreachable(transport_message(e)))?;

    if !reply.is_success() {
        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let message = reply
            .error_message()
            .unwrap_or_else(|| DEFAULT_UPSTREAM_ERROR.to_owned());
        return Err(BrokerError::Upstream { status, message });
    }

    let client_secret = reply
        .client_secret()
        .ok_or(BrokerError::MissingClientSecret)?
        .to_owned();

    Ok(SessionCredential {
        client_secret,
        expires_after: reply.expires_after().cloned(),
    })
}

/// Lenient body parse: empty or malformed JSON means "no body", so the
/// workflow falls back to configuration instead of the request failing.
fn parse_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}

/// Strip the domain error's `HTTP: ` tag; the caller adds its own prefix.
fn transport_message(e: ck_domain::error::Error) -> String {
    match e {
        ck_domain::error::Error::Http(msg) => msg,
        other => other.to_string(),
    }
}
