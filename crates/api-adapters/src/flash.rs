//! One-shot notifications carried across a redirect in a cookie.
//!
//! The server-rendered equivalent of the toast: a mutation handler sets the
//! cookie and redirects; the next page read consumes it, renders the banner,
//! and clears the cookie.

use askama::Template;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::cookies;

pub const FLASH_COOKIE: &str = "wt_flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// What the templates render.
#[derive(Debug, Clone)]
pub struct FlashView {
    pub class: &'static str,
    pub message: String,
}

impl FlashView {
    /// Error banner rendered directly into the current page, without the
    /// cookie round-trip. Used when a read fails and the view degrades to
    /// its empty state.
    pub fn error(message: impl Into<String>) -> Self {
        Flash::error(message).into()
    }
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        let class = match flash.kind {
            FlashKind::Success => "flash flash-success",
            FlashKind::Error => "flash flash-error",
        };
        Self {
            class,
            message: flash.message,
        }
    }
}

fn encode(flash: &Flash) -> String {
    let tag = match flash.kind {
        FlashKind::Success => 's',
        FlashKind::Error => 'e',
    };
    format!("{tag}:{}", URL_SAFE_NO_PAD.encode(&flash.message))
}

fn decode(value: &str) -> Option<Flash> {
    let (tag, body) = value.split_once(':')?;
    let message = String::from_utf8(URL_SAFE_NO_PAD.decode(body).ok()?).ok()?;
    let kind = match tag {
        "s" => FlashKind::Success,
        "e" => FlashKind::Error,
        _ => return None,
    };
    Some(Flash { kind, message })
}

/// Reads the pending flash without clearing it; clearing happens on the
/// response that renders it.
pub fn pending(headers: &HeaderMap) -> Option<Flash> {
    cookies::get(headers, FLASH_COOKIE).and_then(|value| decode(&value))
}

pub fn set_header(flash: &Flash) -> HeaderValue {
    // Base64 payload keeps the value ASCII, so this cannot fail.
    HeaderValue::from_str(&format!(
        "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        encode(flash)
    ))
    .expect("flash cookie value is ASCII")
}

pub fn clear_header() -> HeaderValue {
    HeaderValue::from_static("wt_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// 303 to `to` carrying a flash for the next page.
pub fn redirect_with(to: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    response.headers_mut().append(SET_COOKIE, set_header(&flash));
    response
}

/// Renders a template to a full HTML response. `clear_flash` appends the
/// cookie reset when the page consumed a pending flash.
pub fn render<T: Template>(template: &T, clear_flash: bool) -> Response {
    render_with_status(StatusCode::OK, template, clear_flash)
}

pub fn render_with_status<T: Template>(
    status: StatusCode,
    template: &T,
    clear_flash: bool,
) -> Response {
    match template.render() {
        Ok(html) => {
            let mut response = (status, Html(html)).into_response();
            if clear_flash {
                response.headers_mut().append(SET_COOKIE, clear_header());
            }
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
