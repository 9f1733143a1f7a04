//! Public page rendering and the destination redirect rules.

use axum::http::{header::LOCATION, StatusCode};
use uuid::Uuid;

use integration_tests::{body_string, flash_message, TestApp};

#[tokio::test]
async fn home_renders_the_empty_state_without_content() {
    let app = TestApp::spawn().await.unwrap();
    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("No destinations yet"));
}

#[tokio::test]
async fn destination_without_content_shows_the_empty_page() {
    let app = TestApp::spawn().await.unwrap();
    let response = app.get("/destination").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("No destinations yet"));
}

#[tokio::test]
async fn unknown_destination_id_redirects_with_a_flash() {
    let app = TestApp::spawn().await.unwrap();
    let response = app.get(&format!("/destination/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/destination");
    assert_eq!(
        flash_message(&response).as_deref(),
        Some("Destination not found")
    );
}

#[tokio::test]
async fn malformed_destination_id_gets_the_same_redirect() {
    let app = TestApp::spawn().await.unwrap();
    let response = app.get("/destination/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/destination");
}

#[tokio::test]
async fn gallery_and_reviews_render_empty_states() {
    let app = TestApp::spawn().await.unwrap();

    let gallery = app.get("/gallery").await;
    assert_eq!(gallery.status(), StatusCode::OK);
    assert!(body_string(gallery).await.contains("No photos yet"));

    let reviews = app.get("/reviews").await;
    assert_eq!(reviews.status(), StatusCode::OK);
    assert!(body_string(reviews).await.contains("No reviews yet"));
}

#[tokio::test]
async fn contact_form_flashes_a_confirmation() {
    let app = TestApp::spawn().await.unwrap();
    let response = app
        .post_form("/contact", "name=Jo&email=jo%40example.com&message=hi", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/contact");
    assert!(flash_message(&response).unwrap().contains("Message sent"));
}

#[tokio::test]
async fn unknown_paths_render_the_public_404() {
    let app = TestApp::spawn().await.unwrap();
    let response = app.get("/no-such-trail").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_string(response).await;
    assert!(html.contains("404"));
}
