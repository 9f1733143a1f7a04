//! # Domain Models
//!
//! Persisted entities of the Wildtrails site plus the draft (input) shapes
//! that mutation forms produce. Ids are assigned by the repository at insert
//! time and never change afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A wildlife destination shown on the public site and managed in the admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    /// Card-sized teaser, 10–200 characters at submission time.
    pub short_description: String,
    /// Narrative body, at least 50 characters at submission time.
    pub full_description: String,
    /// Public URL of the hero image; empty string when none was provided.
    pub image_url: String,
    /// Embeddable map URL; empty string when none was provided.
    pub map_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One photo in the public gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Always present; produced by the storage upload step.
    pub image_url: String,
    /// Flat, ordered tag list. Stored as-is: no dedup, no normalization.
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A visitor review record managed through the admin area.
///
/// Distinct from the static testimonial content on the marketing pages;
/// nothing links the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Whole stars, 1 through 5.
    pub rating: i64,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin profile, one-to-one with an identity. Upserted keyed by the
/// identity id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub updated_at: DateTime<Utc>,
}

/// Candidate destination values as submitted by the admin form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationDraft {
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub full_description: String,
    pub image_url: String,
    pub map_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryImageDraft {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub title: String,
    pub content: String,
    pub rating: i64,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub full_name: String,
    pub bio: String,
    pub avatar_url: String,
}

/// Dashboard tallies, one query per page load.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContentCounts {
    pub destinations: i64,
    pub gallery_images: i64,
    pub reviews: i64,
}

/// An authenticated identity. The token is the opaque session handle held in
/// a cookie; `user_id` is stable per account so profile rows survive
/// restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}
