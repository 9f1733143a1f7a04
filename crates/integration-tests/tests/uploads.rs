//! Upload side-channel and the one-shot gallery flow.

use axum::body::to_bytes;
use axum::http::{header::LOCATION, StatusCode};
use serde_json::Value;

use integration_tests::{
    body_string, flash_message, multipart_body, TestApp, ADMIN_EMAIL, PASSWORD,
};

const BOUNDARY: &str = "wildtrails-test-boundary";
const JPEG_STUB: &[u8] = b"\xFF\xD8\xFF\xE0 not a real photo";

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn upload_without_a_session_is_rejected_and_stores_nothing() {
    let app = TestApp::spawn().await.unwrap();
    let body = multipart_body(BOUNDARY, &[], Some(("file", "photo.jpg", JPEG_STUB)));

    let response = app
        .post_multipart("/admin/uploads/gallery", BOUNDARY, body, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("logged in to upload"));

    // The bucket directory stays empty.
    let bucket = app.media_path.join("gallery");
    let stored = std::fs::read_dir(&bucket)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn upload_with_a_session_returns_the_public_url() {
    let app = TestApp::spawn().await.unwrap();
    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    let body = multipart_body(BOUNDARY, &[], Some(("file", "photo.JPG", JPEG_STUB)));
    let response = app
        .post_multipart(
            "/admin/uploads/admin-destinations",
            BOUNDARY,
            body,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("/media/admin-destinations/"));
    assert!(url.ends_with(".jpg"), "extension is normalized: {url}");

    // The object really landed on disk under the bucket.
    let file_name = url.rsplit('/').next().unwrap();
    let stored = app.media_path.join("admin-destinations").join(file_name);
    assert_eq!(std::fs::read(stored).unwrap(), JPEG_STUB);
}

#[tokio::test]
async fn unknown_buckets_are_refused() {
    let app = TestApp::spawn().await.unwrap();
    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    let body = multipart_body(BOUNDARY, &[], Some(("file", "photo.jpg", JPEG_STUB)));
    let response = app
        .post_multipart("/admin/uploads/secrets", BOUNDARY, body, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gallery_form_uploads_and_inserts_in_one_request() {
    let app = TestApp::spawn().await.unwrap();
    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    let body = multipart_body(
        BOUNDARY,
        &[
            ("title", "Elephants at dusk"),
            ("description", "The herd arriving at the reservoir."),
            ("location", "Hurulu Wewa"),
            ("tags", "wildlife, elephants"),
        ],
        Some(("file", "herd.jpg", JPEG_STUB)),
    );
    let response = app
        .post_multipart("/admin/gallery", BOUNDARY, body, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin/gallery");
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Image uploaded successfully")
    );

    let public = body_string(app.get("/gallery").await).await;
    assert!(public.contains("Elephants at dusk"));
    assert!(public.contains("elephants"));
}

#[tokio::test]
async fn gallery_form_without_a_title_rerenders_with_errors() {
    let app = TestApp::spawn().await.unwrap();
    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    let body = multipart_body(
        BOUNDARY,
        &[("title", ""), ("tags", "")],
        Some(("file", "herd.jpg", JPEG_STUB)),
    );
    let response = app
        .post_multipart("/admin/gallery", BOUNDARY, body, Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Title is required"));

    // Nothing published.
    let public = body_string(app.get("/gallery").await).await;
    assert!(public.contains("No photos yet"));
}
