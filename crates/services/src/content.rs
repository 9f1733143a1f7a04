//! Content-management flow: validate → persist → (optionally) touch storage.
//!
//! This is the one place where form input, validation, object storage, and
//! the repository must stay consistent. Handlers call these methods and only
//! translate the outcome into redirects, flashes, and re-rendered forms.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use domains::error::{AppError, FieldError, Result};
use domains::models::{
    ContentCounts, Destination, DestinationDraft, GalleryImage, GalleryImageDraft, Profile,
    ProfileDraft, Review, ReviewDraft, Session,
};
use domains::ports::{ContentRepo, MediaStore};

use crate::validation;

/// Bucket for images uploaded through the gallery management page.
pub const GALLERY_BUCKET: &str = "gallery";
/// Bucket for destination hero images uploaded from the destination form.
pub const DESTINATIONS_BUCKET: &str = "admin-destinations";

/// One gallery submission: text fields plus the file, handled in a single
/// request. Upload succeeding while the insert fails leaves an orphaned
/// stored file; that ordering is deliberate and not reconciled.
#[derive(Debug, Clone)]
pub struct GallerySubmission {
    pub title: String,
    pub description: String,
    pub location: String,
    pub tags_csv: String,
    pub file_name: String,
    pub data: Bytes,
}

pub struct ContentService {
    repo: Arc<dyn ContentRepo>,
    media: Arc<dyn MediaStore>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepo>, media: Arc<dyn MediaStore>) -> Self {
        Self { repo, media }
    }

    // ── Destinations ─────────────────────────────────────────────────────

    pub async fn list_destinations(&self) -> Result<Vec<Destination>> {
        self.repo.list_destinations().await
    }

    pub async fn destination(&self, id: Uuid) -> Result<Option<Destination>> {
        self.repo.get_destination(id).await
    }

    /// Most recently created destination, used when the detail route is
    /// visited without an id.
    pub async fn latest_destination(&self) -> Result<Option<Destination>> {
        Ok(self.repo.list_destinations().await?.into_iter().next())
    }

    pub async fn create_destination(&self, draft: DestinationDraft) -> Result<Destination> {
        validation::validate_destination(&draft).map_err(AppError::validation)?;
        self.repo.insert_destination(draft).await
    }

    pub async fn update_destination(&self, id: Uuid, draft: DestinationDraft) -> Result<Destination> {
        validation::validate_destination(&draft).map_err(AppError::validation)?;
        self.repo.update_destination(id, draft).await
    }

    /// Removes the row, then best-effort removes the hero image if it lives
    /// in our store. A failed cleanup leaves the object behind; the row
    /// deletion stays authoritative.
    pub async fn delete_destination(&self, id: Uuid) -> Result<()> {
        let existing = self.repo.get_destination(id).await?;
        self.repo.delete_destination(id).await?;
        if let Some(destination) = existing {
            self.cleanup_stored_object(&destination.image_url).await;
        }
        Ok(())
    }

    // ── Gallery ──────────────────────────────────────────────────────────

    pub async fn gallery_images(&self) -> Result<Vec<GalleryImage>> {
        self.repo.list_gallery_images().await
    }

    /// The one-shot gallery flow: validate text fields, upload the file,
    /// resolve its public URL, then insert the row.
    pub async fn submit_gallery_image(
        &self,
        session: Option<&Session>,
        submission: GallerySubmission,
    ) -> Result<GalleryImage> {
        let mut errors = Vec::new();
        if submission.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if submission.file_name.is_empty() || submission.data.is_empty() {
            errors.push(FieldError::new("image", "Image is required"));
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let image_url = self
            .upload_image(
                session,
                GALLERY_BUCKET,
                &submission.file_name,
                submission.data,
            )
            .await?;

        let draft = GalleryImageDraft {
            title: submission.title,
            description: optional(submission.description),
            image_url,
            tags: parse_tags(&submission.tags_csv),
            location: optional(submission.location),
        };
        validation::validate_gallery_image(&draft).map_err(AppError::validation)?;
        self.repo.insert_gallery_image(draft).await
    }

    pub async fn delete_gallery_image(&self, id: Uuid) -> Result<()> {
        let existing = self.repo.get_gallery_image(id).await?;
        self.repo.delete_gallery_image(id).await?;
        if let Some(image) = existing {
            self.cleanup_stored_object(&image.image_url).await;
        }
        Ok(())
    }

    // ── Reviews ──────────────────────────────────────────────────────────

    pub async fn reviews(&self) -> Result<Vec<Review>> {
        self.repo.list_reviews().await
    }

    pub async fn create_review(&self, draft: ReviewDraft) -> Result<Review> {
        validation::validate_review(&draft).map_err(AppError::validation)?;
        self.repo.insert_review(draft).await
    }

    pub async fn delete_review(&self, id: Uuid) -> Result<()> {
        self.repo.delete_review(id).await
    }

    // ── Profile ──────────────────────────────────────────────────────────

    pub async fn profile(&self, id: Uuid) -> Result<Option<Profile>> {
        self.repo.get_profile(id).await
    }

    pub async fn save_profile(&self, id: Uuid, draft: ProfileDraft) -> Result<Profile> {
        validation::validate_profile(&draft).map_err(AppError::validation)?;
        self.repo.upsert_profile(id, draft).await
    }

    // ── Dashboard ────────────────────────────────────────────────────────

    pub async fn counts(&self) -> Result<ContentCounts> {
        self.repo.counts().await
    }

    // ── Upload side-channel ──────────────────────────────────────────────

    /// Stores a file under a generated unique path and returns its public
    /// URL. Requires an active session and checks it before touching
    /// storage. Never writes the database: the URL only lands in a row when
    /// the surrounding form is submitted.
    pub async fn upload_image(
        &self,
        session: Option<&Session>,
        bucket: &str,
        file_name: &str,
        data: Bytes,
    ) -> Result<String> {
        if session.is_none() {
            return Err(AppError::Unauthorized(
                "You must be logged in to upload files".to_string(),
            ));
        }
        let path = unique_object_path(file_name);
        self.media.ensure_bucket(bucket).await?;
        self.media.store(bucket, &path, data).await?;
        Ok(self.media.public_url(bucket, &path))
    }

    async fn cleanup_stored_object(&self, url: &str) {
        let Some((bucket, path)) = self.media.parse_public_url(url) else {
            return; // foreign URL, nothing of ours to clean up
        };
        if let Err(err) = self.media.remove(&bucket, &path).await {
            tracing::warn!(
                bucket = %bucket,
                path = %path,
                error = %err,
                "stored object left behind after row delete"
            );
        }
    }
}

/// Splits a comma-separated tag string, trimming whitespace and dropping
/// empty segments. Order preserved, no dedup.
pub fn parse_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Unique storage path: random stem plus the original extension.
fn unique_object_path(file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{}.{}", Uuid::new_v4().simple(), ext)
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
