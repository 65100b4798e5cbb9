//! REST implementation of [`SessionApi`].
//!
//! `RestSessionClient` wraps a `reqwest::Client` and performs exactly one
//! `POST /v1/chatkit/sessions` per call.  There is no retry: any failure is
//! terminal for the browser request that triggered it.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use ck_domain::error::{Error, Result};
use ck_domain::trace::TraceEvent;
use reqwest::Client;

use crate::provider::SessionApi;
use crate::types::{CreateSessionRequest, SessionReply};

/// Path of the upstream session-creation endpoint, relative to the base URL.
pub const SESSIONS_PATH: &str = "/v1/chatkit/sessions";

/// Beta opt-in header required by the ChatKit endpoints.
pub const BETA_HEADER: &str = "OpenAI-Beta";
pub const BETA_HEADER_VALUE: &str = "chatkit_beta=v1";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client for the upstream session API.
///
/// Created once at startup and shared by every request; the underlying
/// `reqwest::Client` maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestSessionClient {
    http: Client,
    base_url: String,
}

impl RestSessionClient {
    /// Build a client for `base_url` (e.g. `https://api.openai.com`).
    ///
    /// `timeout` of `None` leaves the call unbounded on the client side.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn sessions_url(&self) -> String {
        format!("{}{}", self.base_url, SESSIONS_PATH)
    }
}

#[async_trait]
impl SessionApi for RestSessionClient {
    async fn create_session(
        &self,
        api_key: &str,
        req: &CreateSessionRequest,
    ) -> Result<SessionReply> {
        let start = Instant::now();

        let resp = self
            .http
            .post(self.sessions_url())
            .bearer_auth(api_key)
            .header(BETA_HEADER, BETA_HEADER_VALUE)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint = SESSIONS_PATH, "upstream unreachable");
                Error::Http(e.to_string())
            })?;

        let status = resp.status().as_u16();

        // A body that fails mid-read degrades the same way as one that
        // isn't JSON: the reply carries an empty payload.
        let body = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(error = %e, status, "failed reading upstream body");
                Default::default()
            }
        };

        TraceEvent::UpstreamSessionCall {
            endpoint: SESSIONS_PATH.to_owned(),
            status,
            duration_ms: start.elapsed().as_millis() as u64,
        }
        .emit();

        Ok(SessionReply::from_body(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RestSessionClient::new("https://api.openai.com/", None).unwrap();
        assert_eq!(client.base_url(), "https://api.openai.com");
        assert_eq!(
            client.sessions_url(),
            "https://api.openai.com/v1/chatkit/sessions"
        );
    }
}
