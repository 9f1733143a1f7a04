//! # Core Traits (Ports)
//!
//! Contracts the adapters implement. The web layer only ever talks to these,
//! so the repository, media store, and identity backend can each be swapped
//! without touching view code. All operations are single-shot: no retry, no
//! backoff — the user is the retry mechanism.

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    ContentCounts, Destination, DestinationDraft, GalleryImage, GalleryImageDraft, Profile,
    ProfileDraft, Review, ReviewDraft, Session,
};

/// Data persistence contract for all four entities.
///
/// Lists come back ordered by creation time, newest first, unless a method
/// documents otherwise.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContentRepo: Send + Sync {
    // Destinations
    async fn list_destinations(&self) -> Result<Vec<Destination>>;
    async fn get_destination(&self, id: Uuid) -> Result<Option<Destination>>;
    async fn insert_destination(&self, draft: DestinationDraft) -> Result<Destination>;
    async fn update_destination(&self, id: Uuid, draft: DestinationDraft) -> Result<Destination>;
    async fn delete_destination(&self, id: Uuid) -> Result<()>;

    // Gallery
    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>>;
    async fn get_gallery_image(&self, id: Uuid) -> Result<Option<GalleryImage>>;
    async fn insert_gallery_image(&self, draft: GalleryImageDraft) -> Result<GalleryImage>;
    async fn delete_gallery_image(&self, id: Uuid) -> Result<()>;

    // Reviews
    async fn list_reviews(&self) -> Result<Vec<Review>>;
    async fn insert_review(&self, draft: ReviewDraft) -> Result<Review>;
    async fn delete_review(&self, id: Uuid) -> Result<()>;

    // Profiles (create-or-replace keyed by identity id)
    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>>;
    async fn upsert_profile(&self, id: Uuid, draft: ProfileDraft) -> Result<Profile>;

    /// Dashboard tallies.
    async fn counts(&self) -> Result<ContentCounts>;
}

/// Object storage contract. A bucket is a flat namespace of files with
/// public URLs.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Creates the bucket if it does not exist yet. Idempotent.
    async fn ensure_bucket(&self, bucket: &str) -> Result<()>;

    /// Writes `data` under `bucket/path`, overwriting any previous object.
    async fn store(&self, bucket: &str, path: &str, data: Bytes) -> Result<()>;

    /// Removes a stored object. Callers treat failures as best-effort.
    async fn remove(&self, bucket: &str, path: &str) -> Result<()>;

    /// Public URL for an object, valid whether or not it exists yet.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Inverse of [`public_url`](Self::public_url): `(bucket, path)` if the
    /// URL points into this store, `None` for foreign URLs.
    fn parse_public_url(&self, url: &str) -> Option<(String, String)>;
}

/// Identity and session contract used to gate admin mutations.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies credentials and opens a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Resolves a session token to the identity it belongs to, if any.
    async fn session(&self, token: &str) -> Result<Option<Session>>;

    /// Ends a session. Unknown tokens are ignored.
    async fn sign_out(&self, token: &str) -> Result<()>;
}

/// Authorization rule for the admin area.
///
/// Deliberately a predicate rather than a baked-in list so the rule source
/// can move to configuration or a role table without touching view code.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AccessPolicy: Send + Sync {
    fn is_authorized(&self, email: &str) -> bool;
}
