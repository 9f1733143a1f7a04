//! # API Adapters
//!
//! The web face of Wildtrails: axum routers and handlers, the admin gate,
//! flash-message cookies, and the askama templates for every page. Handlers
//! stay thin — validation and persistence rules live in `services`.

pub mod cookies;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;

pub use routes::router;
pub use state::AppState;
