//! Gated admin management pages. Every handler here runs behind
//! [`crate::middleware::admin_gate`], which guarantees the [`Session`]
//! extension is present.

use axum::extract::{Form, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

use domains::error::{AppError, FieldError};
use domains::models::{DestinationDraft, ProfileDraft, ReviewDraft, Session};
use services::GallerySubmission;

use crate::flash::{self, Flash, FlashView};
use crate::handlers::multipart;
use crate::state::AppState;
use crate::templates::{
    AdminDestinationsTemplate, AdminGalleryTemplate, AdminNotFoundTemplate, AdminReviewsTemplate,
    DashboardTemplate, DestinationFormTemplate, DestinationFormView, GalleryFormView,
    ProfileFormView, ReviewFormView, SettingsTemplate,
};

// ── Dashboard ───────────────────────────────────────────────────────────

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (counts, banner) = match state.content.counts().await {
        Ok(counts) => (counts, None),
        Err(err) => {
            tracing::error!(error = %err, "dashboard counts failed");
            (
                Default::default(),
                Some(FlashView::error("Unable to load counts right now")),
            )
        }
    };
    let pending = flash::pending(&headers);
    let template = DashboardTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        counts,
    };
    flash::render(&template, pending.is_some())
}

// ── Destinations ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct DestinationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub map_url: String,
}

impl DestinationForm {
    fn draft(&self) -> DestinationDraft {
        DestinationDraft {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            full_description: self.full_description.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            map_url: self.map_url.trim().to_string(),
        }
    }

    fn view(&self) -> DestinationFormView {
        DestinationFormView {
            name: self.name.clone(),
            location: self.location.clone(),
            short_description: self.short_description.clone(),
            full_description: self.full_description.clone(),
            image_url: self.image_url.clone(),
            map_url: self.map_url.clone(),
        }
    }
}

pub async fn destinations_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (rows, banner) = match state.content.list_destinations().await {
        Ok(rows) => (rows, None),
        Err(err) => {
            tracing::error!(error = %err, "destination list failed");
            (
                Vec::new(),
                Some(FlashView::error("Unable to load destinations right now")),
            )
        }
    };
    let pending = flash::pending(&headers);
    let template = AdminDestinationsTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        rows: rows.iter().map(Into::into).collect(),
    };
    flash::render(&template, pending.is_some())
}

pub async fn add_destination_form() -> Response {
    flash::render(&add_form(DestinationFormView::default(), Vec::new(), None), false)
}

pub async fn add_destination(
    State(state): State<AppState>,
    Form(form): Form<DestinationForm>,
) -> Response {
    match state.content.create_destination(form.draft()).await {
        Ok(_) => flash::redirect_with(
            "/admin/destinations",
            Flash::success("Destination created successfully"),
        ),
        Err(AppError::Validation(errors)) => flash::render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            &add_form(form.view(), errors, None),
            false,
        ),
        Err(err) => write_failed(add_form(form.view(), Vec::new(), Some(write_flash(&err)))),
    }
}

pub async fn edit_destination_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return missing_destination();
    };
    match state.content.destination(id).await {
        Ok(Some(destination)) => flash::render(
            &edit_form(id, DestinationFormView::from(&destination), Vec::new(), None),
            false,
        ),
        Ok(None) => missing_destination(),
        Err(err) => {
            tracing::error!(error = %err, "destination fetch failed");
            flash::redirect_with(
                "/admin/destinations",
                Flash::error("Unable to load that destination right now"),
            )
        }
    }
}

pub async fn update_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DestinationForm>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return missing_destination();
    };
    match state.content.update_destination(id, form.draft()).await {
        Ok(_) => flash::redirect_with(
            "/admin/destinations",
            Flash::success("Destination updated successfully"),
        ),
        Err(AppError::Validation(errors)) => flash::render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            &edit_form(id, form.view(), errors, None),
            false,
        ),
        Err(AppError::NotFound(..)) => missing_destination(),
        Err(err) => write_failed(edit_form(id, form.view(), Vec::new(), Some(write_flash(&err)))),
    }
}

pub async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return missing_destination();
    };
    match state.content.delete_destination(id).await {
        Ok(()) => flash::redirect_with(
            "/admin/destinations",
            Flash::success("Destination deleted successfully"),
        ),
        Err(err) => flash::redirect_with("/admin/destinations", Flash::error(err.to_string())),
    }
}

fn add_form(
    values: DestinationFormView,
    errors: Vec<FieldError>,
    flash: Option<FlashView>,
) -> DestinationFormTemplate {
    DestinationFormTemplate {
        flash,
        heading: "Add New Destination".to_string(),
        action: "/admin/destinations/add".to_string(),
        submit_label: "Create Destination".to_string(),
        values,
        errors,
    }
}

fn edit_form(
    id: Uuid,
    values: DestinationFormView,
    errors: Vec<FieldError>,
    flash: Option<FlashView>,
) -> DestinationFormTemplate {
    DestinationFormTemplate {
        flash,
        heading: "Edit Destination".to_string(),
        action: format!("/admin/destinations/edit/{id}"),
        submit_label: "Save Changes".to_string(),
        values,
        errors,
    }
}

fn missing_destination() -> Response {
    flash::redirect_with("/admin/destinations", Flash::error("Destination not found"))
}

// ── Gallery ─────────────────────────────────────────────────────────────

pub async fn gallery_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (images, banner) = match state.content.gallery_images().await {
        Ok(rows) => (rows, None),
        Err(err) => {
            tracing::error!(error = %err, "gallery list failed");
            (
                Vec::new(),
                Some(FlashView::error("Unable to load the gallery right now")),
            )
        }
    };
    let pending = flash::pending(&headers);
    let template = AdminGalleryTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        errors: Vec::new(),
        values: GalleryFormView::default(),
        images: images.iter().map(Into::into).collect(),
    };
    flash::render(&template, pending.is_some())
}

pub async fn submit_gallery_image(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    body: Multipart,
) -> Response {
    let form = match multipart::parse(body).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    let values = GalleryFormView {
        title: form.field("title"),
        description: form.field("description"),
        location: form.field("location"),
        tags: form.field("tags"),
    };
    let (file_name, data) = form
        .file
        .map(|file| (file.file_name, file.data))
        .unwrap_or_default();

    let submission = GallerySubmission {
        title: values.title.clone(),
        description: values.description.clone(),
        location: values.location.clone(),
        tags_csv: values.tags.clone(),
        file_name,
        data,
    };
    match state
        .content
        .submit_gallery_image(Some(&session), submission)
        .await
    {
        Ok(_) => flash::redirect_with(
            "/admin/gallery",
            Flash::success("Image uploaded successfully"),
        ),
        Err(AppError::Validation(errors)) => {
            gallery_rerender(&state, StatusCode::UNPROCESSABLE_ENTITY, errors, values, None).await
        }
        Err(err) => {
            gallery_rerender(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                Vec::new(),
                values,
                Some(write_flash(&err)),
            )
            .await
        }
    }
}

/// Failed submissions re-render the management page with the entered
/// values intact instead of bouncing through a redirect that drops them.
async fn gallery_rerender(
    state: &AppState,
    status: StatusCode,
    errors: Vec<FieldError>,
    values: GalleryFormView,
    banner: Option<FlashView>,
) -> Response {
    let images = state.content.gallery_images().await.unwrap_or_default();
    flash::render_with_status(
        status,
        &AdminGalleryTemplate {
            flash: banner,
            errors,
            values,
            images: images.iter().map(Into::into).collect(),
        },
        false,
    )
}

pub async fn delete_gallery_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return flash::redirect_with("/admin/gallery", Flash::error("Image not found"));
    };
    match state.content.delete_gallery_image(id).await {
        Ok(()) => flash::redirect_with("/admin/gallery", Flash::success("Image deleted")),
        Err(err) => flash::redirect_with("/admin/gallery", Flash::error(err.to_string())),
    }
}

// ── Reviews ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ReviewForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
}

pub async fn reviews_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (reviews, banner) = match state.content.reviews().await {
        Ok(rows) => (rows, None),
        Err(err) => {
            tracing::error!(error = %err, "review list failed");
            (
                Vec::new(),
                Some(FlashView::error("Unable to load reviews right now")),
            )
        }
    };
    let pending = flash::pending(&headers);
    let template = AdminReviewsTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        errors: Vec::new(),
        values: ReviewFormView::default(),
        reviews: reviews.iter().map(Into::into).collect(),
    };
    flash::render(&template, pending.is_some())
}

pub async fn create_review(State(state): State<AppState>, Form(form): Form<ReviewForm>) -> Response {
    // An unparsable rating falls out of the 1–5 range and is reported by
    // validation like any other bad value.
    let rating = form.rating.trim().parse::<i64>().unwrap_or(0);
    let draft = ReviewDraft {
        title: form.title.trim().to_string(),
        content: form.content.trim().to_string(),
        rating,
        location: optional(&form.location),
        image_url: optional(&form.image_url),
    };
    let values = ReviewFormView {
        title: form.title,
        content: form.content,
        rating: form.rating,
        location: form.location,
        image_url: form.image_url,
    };
    match state.content.create_review(draft).await {
        Ok(_) => flash::redirect_with("/admin/reviews", Flash::success("Review added successfully")),
        Err(AppError::Validation(errors)) => {
            review_rerender(&state, StatusCode::UNPROCESSABLE_ENTITY, errors, values, None).await
        }
        Err(err) => {
            review_rerender(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                Vec::new(),
                values,
                Some(write_flash(&err)),
            )
            .await
        }
    }
}

async fn review_rerender(
    state: &AppState,
    status: StatusCode,
    errors: Vec<FieldError>,
    values: ReviewFormView,
    banner: Option<FlashView>,
) -> Response {
    let reviews = state.content.reviews().await.unwrap_or_default();
    flash::render_with_status(
        status,
        &AdminReviewsTemplate {
            flash: banner,
            errors,
            values,
            reviews: reviews.iter().map(Into::into).collect(),
        },
        false,
    )
}

pub async fn delete_review(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return flash::redirect_with("/admin/reviews", Flash::error("Review not found"));
    };
    match state.content.delete_review(id).await {
        Ok(()) => flash::redirect_with("/admin/reviews", Flash::success("Review deleted")),
        Err(err) => flash::redirect_with("/admin/reviews", Flash::error(err.to_string())),
    }
}

// ── Settings ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ProfileForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
}

pub async fn settings_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Response {
    let (profile, banner) = match state.content.profile(session.user_id).await {
        Ok(profile) => (profile, None),
        Err(err) => {
            tracing::error!(error = %err, "profile fetch failed");
            (
                None,
                Some(FlashView::error("Unable to load your profile right now")),
            )
        }
    };
    let values = profile
        .map(|p| ProfileFormView {
            full_name: p.full_name,
            bio: p.bio,
            avatar_url: p.avatar_url,
        })
        .unwrap_or_default();
    let pending = flash::pending(&headers);
    let template = SettingsTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        errors: Vec::new(),
        email: session.email,
        values,
    };
    flash::render(&template, pending.is_some())
}

pub async fn save_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let draft = ProfileDraft {
        full_name: form.full_name.trim().to_string(),
        bio: form.bio.trim().to_string(),
        avatar_url: form.avatar_url.trim().to_string(),
    };
    match state.content.save_profile(session.user_id, draft).await {
        Ok(_) => flash::redirect_with(
            "/admin/settings",
            Flash::success("Profile updated successfully"),
        ),
        Err(AppError::Validation(errors)) => flash::render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            &SettingsTemplate {
                flash: None,
                errors,
                email: session.email,
                values: ProfileFormView {
                    full_name: form.full_name,
                    bio: form.bio,
                    avatar_url: form.avatar_url,
                },
            },
            false,
        ),
        Err(err) => flash::redirect_with("/admin/settings", Flash::error(err.to_string())),
    }
}

// ── Shared ──────────────────────────────────────────────────────────────

pub async fn admin_not_found() -> Response {
    flash::render_with_status(StatusCode::NOT_FOUND, &AdminNotFoundTemplate, false)
}

fn parse_id(raw: &str) -> Option<Uuid> {
    raw.parse().ok()
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn write_flash(err: &AppError) -> FlashView {
    Flash::error(err.to_string()).into()
}

fn write_failed(template: DestinationFormTemplate) -> Response {
    flash::render_with_status(StatusCode::INTERNAL_SERVER_ERROR, &template, false)
}
