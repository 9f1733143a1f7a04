//! Login flow and the three gate outcomes.

use axum::http::{header::LOCATION, StatusCode};
use domains::ports::IdentityProvider;

use integration_tests::{body_string, TestApp, ADMIN_EMAIL, GUIDE_EMAIL, PASSWORD};

#[tokio::test]
async fn unauthenticated_admin_requests_redirect_to_login() {
    let app = TestApp::spawn().await.unwrap();
    for path in ["/admin", "/admin/destinations", "/admin/settings"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.headers()[LOCATION], "/admin/login");
    }
}

#[tokio::test]
async fn login_page_is_reachable_without_a_session() {
    let app = TestApp::spawn().await.unwrap();
    let response = app.get("/admin/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Admin Login"));
}

#[tokio::test]
async fn wrong_password_rerenders_with_the_provider_error() {
    let app = TestApp::spawn().await.unwrap();
    let body = format!("email={ADMIN_EMAIL}&password=wrong-pass");
    let response = app.post_form("/admin/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Invalid login credentials"));
    assert!(html.contains(ADMIN_EMAIL), "entered email is kept");
}

#[tokio::test]
async fn unlisted_email_is_refused_before_the_password_check() {
    let app = TestApp::spawn().await.unwrap();
    // Correct password, but the account is not on the allow-list.
    let body = format!("email={GUIDE_EMAIL}&password={PASSWORD}");
    let response = app.post_form("/admin/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("You do not have admin privileges"));
}

#[tokio::test]
async fn listed_account_logs_in_and_reaches_the_dashboard() {
    let app = TestApp::spawn().await.unwrap();
    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.expect("session set");

    let response = app.get_with_cookie("/admin", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Dashboard"));
}

#[tokio::test]
async fn session_without_authorization_sees_the_denied_panel() {
    let app = TestApp::spawn().await.unwrap();
    // Mint the session directly: the login route would have refused it.
    let session = app.identity.sign_in(GUIDE_EMAIL, PASSWORD).await.unwrap();
    let cookie = format!("wt_session={}", session.token);

    let response = app.get_with_cookie("/admin", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Access denied"));
    assert!(html.contains(GUIDE_EMAIL));
    assert!(html.contains("/admin/logout"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = TestApp::spawn().await.unwrap();
    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.unwrap();

    let response = app.post_form("/admin/logout", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/admin/login");

    // The old token no longer opens the gate.
    let after = app.get_with_cookie("/admin", &cookie).await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
    assert_eq!(after.headers()[LOCATION], "/admin/login");
}

#[tokio::test]
async fn unknown_admin_paths_stay_behind_the_gate() {
    let app = TestApp::spawn().await.unwrap();

    // Without a session the 404 is not even reachable.
    let anonymous = app.get("/admin/no-such-page").await;
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(anonymous.headers()[LOCATION], "/admin/login");

    let cookie = app.login(ADMIN_EMAIL, PASSWORD).await.unwrap();
    let authed = app.get_with_cookie("/admin/no-such-page", &cookie).await;
    assert_eq!(authed.status(), StatusCode::NOT_FOUND);
    let html = body_string(authed).await;
    assert!(html.contains("No admin page lives at this address"));
}
