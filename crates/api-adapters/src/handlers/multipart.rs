//! Shared multipart parsing for the upload endpoint and the gallery form.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

pub struct FilePart {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Default)]
pub struct ParsedForm {
    pub fields: HashMap<String, String>,
    pub file: Option<FilePart>,
}

impl ParsedForm {
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

/// Drains a multipart body into text fields plus the first file part.
/// Malformed bodies come back as a 400 to hand straight to the client.
pub async fn parse(mut multipart: Multipart) -> Result<ParsedForm, Response> {
    let mut parsed = ParsedForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(error = %err, "rejected malformed multipart body");
                return Err(StatusCode::BAD_REQUEST.into_response());
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| StatusCode::BAD_REQUEST.into_response())?;
                if parsed.file.is_none() {
                    parsed.file = Some(FilePart { file_name, data });
                }
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| StatusCode::BAD_REQUEST.into_response())?;
                parsed.fields.insert(name, value);
            }
        }
    }
    Ok(parsed)
}
