//! Image upload side-channel.
//!
//! Deliberately mounted outside the admin gate: the session requirement is
//! enforced inside [`services::ContentService::upload_image`], which checks
//! it before any storage call. The endpoint answers JSON because client
//! script writes the returned URL into the form it came from.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domains::error::AppError;
use services::{DESTINATIONS_BUCKET, GALLERY_BUCKET};

use crate::handlers::multipart;
use crate::session;
use crate::state::AppState;

pub async fn upload(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    headers: HeaderMap,
    body: Multipart,
) -> Response {
    if bucket != GALLERY_BUCKET && bucket != DESTINATIONS_BUCKET {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "unknown bucket" })),
        )
            .into_response();
    }

    let form = match multipart::parse(body).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let Some(file) = form.file else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "no file in request" })),
        )
            .into_response();
    };

    let active = session::current(&state, &headers).await;
    match state
        .content
        .upload_image(active.as_ref(), &bucket, &file.file_name, file.data)
        .await
    {
        Ok(url) => Json(json!({ "url": url })).into_response(),
        Err(AppError::Unauthorized(message)) => {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, bucket = %bucket, "upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "upload failed" })),
            )
                .into_response()
        }
    }
}
