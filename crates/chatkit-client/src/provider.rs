use async_trait::async_trait;
use ck_domain::error::Result;

use crate::types::{CreateSessionRequest, SessionReply};

/// Abstraction over the upstream session-creation endpoint.
///
/// `Err` means the call never completed (connection refused, DNS, TLS,
/// timeout).  Any HTTP answer, including 4xx/5xx, is an `Ok` reply.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn create_session(
        &self,
        api_key: &str,
        req: &CreateSessionRequest,
    ) -> Result<SessionReply>;
}
