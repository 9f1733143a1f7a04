//! Orchestration layer between the web handlers and the ports.
//!
//! Holds everything the views must agree on: validation rules, the
//! content-management flow, access evaluation, and the display-only
//! decorations.

pub mod content;
pub mod gate;
pub mod itinerary;
pub mod validation;
pub mod viewmodel;

pub use content::{ContentService, GallerySubmission, DESTINATIONS_BUCKET, GALLERY_BUCKET};
pub use gate::AdminAccess;
