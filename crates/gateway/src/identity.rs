//! Visitor identity: a stable per-browser id carried in a cookie.
//!
//! The id is minted on the first request that lacks the cookie and is never
//! re-issued afterwards.  Upstream receives it as the session `user`, which
//! is how it ties a returning visitor's sessions together.

use axum_extra::extract::CookieJar;
use ck_domain::trace::TraceEvent;
use uuid::Uuid;

/// Name of the identity cookie.
pub const COOKIE_NAME: &str = "chatkit_session_id";

/// Outcome of resolving the visitor for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorIdentity {
    pub visitor_id: String,
    /// Set only when the id was minted for this request; the response must
    /// then carry it back as a cookie.
    pub cookie_to_set: Option<String>,
}

impl VisitorIdentity {
    pub fn is_new(&self) -> bool {
        self.cookie_to_set.is_some()
    }
}

/// Reuse the incoming cookie, or mint a fresh UUID v4.  An empty cookie
/// value is treated as no cookie.
pub fn resolve(jar: &CookieJar) -> VisitorIdentity {
    if let Some(existing) = jar.get(COOKIE_NAME).map(|c| c.value()).filter(|v| !v.is_empty()) {
        return VisitorIdentity {
            visitor_id: existing.to_owned(),
            cookie_to_set: None,
        };
    }

    let visitor_id = Uuid::new_v4().to_string();
    TraceEvent::VisitorMinted {
        visitor_id: visitor_id.clone(),
    }
    .emit();

    VisitorIdentity {
        cookie_to_set: Some(visitor_id.clone()),
        visitor_id,
    }
}
