//! Harness for driving the full router in-process with `tower::oneshot`.
//!
//! Each [`TestApp`] gets its own in-memory SQLite database and a temporary
//! media directory, plus two known accounts: one on the admin allow-list and
//! one that can sign in but is not allowed into the admin area.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tempfile::TempDir;
use tower::ServiceExt;

use api_adapters::AppState;
use auth_adapters::{hash_password, AdminAccount, AllowListPolicy, SimpleIdentityProvider};
use services::ContentService;
use storage_adapters::{LocalMediaStore, SqliteContentRepo};

pub const ADMIN_EMAIL: &str = "admin@wildtrails.example";
pub const GUIDE_EMAIL: &str = "guide@wildtrails.example";
pub const PASSWORD: &str = "safari-pass";

pub struct TestApp {
    pub router: Router,
    /// Direct handle for tests that need a session the login flow would
    /// refuse (e.g. an authenticated but unlisted account).
    pub identity: Arc<SimpleIdentityProvider>,
    /// Where uploaded objects land on disk.
    pub media_path: std::path::PathBuf,
    // Held so the media directory outlives the router.
    _media_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> anyhow::Result<Self> {
        let repo = SqliteContentRepo::connect("sqlite::memory:").await?;

        let media_dir = tempfile::tempdir()?;
        let media = Arc::new(LocalMediaStore::new(media_dir.path(), "/media"));

        let hash = hash_password(PASSWORD)?;
        let identity = Arc::new(SimpleIdentityProvider::new(vec![
            AdminAccount {
                email: ADMIN_EMAIL.to_string(),
                password_hash: hash.clone(),
            },
            AdminAccount {
                email: GUIDE_EMAIL.to_string(),
                password_hash: hash,
            },
        ]));
        let policy = Arc::new(AllowListPolicy::new(vec![ADMIN_EMAIL.to_string()]));

        let content = Arc::new(ContentService::new(Arc::new(repo), media));
        let state = AppState::new(content, identity.clone(), policy);
        let router = api_adapters::router(state, media_dir.path());

        Ok(Self {
            router,
            identity,
            media_path: media_dir.path().to_path_buf(),
            _media_dir: media_dir,
        })
    }

    pub async fn get(&self, path: &str) -> Response<Body> {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Response<Body> {
        self.request(
            Request::get(path)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_form(
        &self,
        path: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder =
            Request::post(path).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        boundary: &str,
        body: Vec<u8>,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::post(path).header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// Logs in and returns the `wt_session=...` pair for later requests.
    pub async fn login(&self, email: &str, password: &str) -> Option<String> {
        let body = format!(
            "email={}&password={}",
            urlencode(email),
            urlencode(password)
        );
        let response = self.post_form("/admin/login", &body, None).await;
        session_cookie(&response)
    }

    async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// The `wt_session=<token>` pair from Set-Cookie, skipping clears.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    cookie_pair(response, "wt_session")
}

/// The decoded flash message set on a response, if any.
pub fn flash_message(response: &Response<Body>) -> Option<String> {
    let pair = cookie_pair(response, "wt_flash")?;
    let value = pair.split_once('=')?.1;
    let body = value.split_once(':')?.1;
    let bytes = URL_SAFE_NO_PAD.decode(body).ok()?;
    String::from_utf8(bytes).ok()
}

fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    for header in response.headers().get_all(SET_COOKIE) {
        let raw = header.to_str().ok()?;
        let pair = raw.split(';').next()?.trim();
        if let Some((key, value)) = pair.split_once('=') {
            if key == name && !value.is_empty() {
                return Some(pair.to_string());
            }
        }
    }
    None
}

/// Builds a multipart body with the given text fields and optional file part.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((name, file_name, data)) = file {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Just enough escaping for form bodies built in tests.
pub fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
