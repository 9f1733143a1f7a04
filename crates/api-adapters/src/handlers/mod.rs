//! Request handlers, grouped by surface.

pub mod admin;
pub mod auth;
pub mod multipart;
pub mod public;
pub mod uploads;
