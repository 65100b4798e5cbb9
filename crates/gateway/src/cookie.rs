//! `Set-Cookie` serialization for the visitor identity.

use axum::http::{header::SET_COOKIE, HeaderValue};
use axum::response::Response;

use crate::identity::COOKIE_NAME;

/// Identity cookie lifetime: 30 days.
pub const MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;

/// `chatkit_session_id=<id>; Max-Age=2592000; Path=/; HttpOnly; SameSite=Lax[; Secure]`
pub fn identity_cookie(value: &str, secure: bool) -> String {
    format!(
        "{COOKIE_NAME}={value}; Max-Age={MAX_AGE_SECS}; Path=/; HttpOnly; SameSite=Lax{}",
        if secure { "; Secure" } else { "" }
    )
}

/// Attach the identity cookie when one was minted for this request.
/// Responses for an already-known visitor are left untouched.
pub fn attach(resp: &mut Response, cookie_to_set: Option<&str>, secure: bool) {
    let Some(value) = cookie_to_set else {
        return;
    };
    match HeaderValue::from_str(&identity_cookie(value, secure)) {
        Ok(hv) => {
            resp.headers_mut().append(SET_COOKIE, hv);
        }
        Err(e) => tracing::error!(error = %e, "identity cookie is not a valid header value"),
    }
}
