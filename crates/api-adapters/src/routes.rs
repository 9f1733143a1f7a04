//! Router assembly.

use std::path::Path;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, auth, public, uploads};
use crate::middleware::admin_gate;
use crate::state::AppState;

/// The full application router. `media_root` is the directory uploaded
/// objects are served from under `/media`.
pub fn router(state: AppState, media_root: &Path) -> Router {
    // Everything behind the gate, including the admin 404, so unknown admin
    // paths still require a session.
    let gated = Router::new()
        .route("/", get(admin::dashboard))
        .route("/destinations", get(admin::destinations_page))
        .route(
            "/destinations/add",
            get(admin::add_destination_form).post(admin::add_destination),
        )
        .route(
            "/destinations/edit/{id}",
            get(admin::edit_destination_form).post(admin::update_destination),
        )
        .route("/destinations/delete/{id}", post(admin::delete_destination))
        .route(
            "/gallery",
            get(admin::gallery_page).post(admin::submit_gallery_image),
        )
        .route("/gallery/delete/{id}", post(admin::delete_gallery_image))
        .route(
            "/reviews",
            get(admin::reviews_page).post(admin::create_review),
        )
        .route("/reviews/delete/{id}", post(admin::delete_review))
        .route(
            "/settings",
            get(admin::settings_page).post(admin::save_profile),
        )
        .fallback(admin::admin_not_found)
        .layer(from_fn_with_state(state.clone(), admin_gate));

    // Login, logout, and the upload side-channel stay outside the gate; the
    // upload handler's session check lives in the service layer.
    let admin_routes = Router::new()
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/uploads/{bucket}", post(uploads::upload))
        .merge(gated);

    Router::new()
        .route("/", get(public::home))
        .route("/destination", get(public::destination_latest))
        .route("/destination/{id}", get(public::destination_detail))
        .route("/gallery", get(public::gallery))
        .route("/reviews", get(public::reviews))
        .route("/contact", get(public::contact).post(public::send_contact))
        .nest("/admin", admin_routes)
        .nest_service("/media", ServeDir::new(media_root))
        .fallback(public::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
