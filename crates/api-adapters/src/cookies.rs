//! Minimal cookie reading shared by the flash and session layers.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// First value of `name` across all Cookie headers, if any.
pub fn get(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_a_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("a=1; wt_session=tok-123; b=2"),
        );
        assert_eq!(get(&headers, "wt_session").as_deref(), Some("tok-123"));
        assert_eq!(get(&headers, "missing"), None);
    }
}
