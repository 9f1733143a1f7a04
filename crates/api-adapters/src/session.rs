//! Session cookie plumbing.

use axum::http::{HeaderMap, HeaderValue};

use domains::models::Session;

use crate::cookies;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "wt_session";

pub fn token(headers: &HeaderMap) -> Option<String> {
    cookies::get(headers, SESSION_COOKIE)
}

/// Resolves the request's session, if the cookie names a live one. Identity
/// lookup failures count as "no session" — the gate will send the user back
/// through login rather than erroring the page.
pub async fn current(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = token(headers)?;
    state.identity.session(&token).await.ok().flatten()
}

pub fn set_header(token: &str) -> HeaderValue {
    // Tokens are generated UUIDs, always ASCII.
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .expect("session cookie value is ASCII")
}

pub fn clear_header() -> HeaderValue {
    HeaderValue::from_static("wt_session=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
