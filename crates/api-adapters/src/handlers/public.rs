//! Public site pages.
//!
//! Read failures never 500: the page degrades to its empty state with an
//! error banner, and the rest of the site stays reachable.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use services::{itinerary, viewmodel};

use crate::flash::{self, Flash, FlashView};
use crate::state::AppState;
use crate::templates::{
    ContactTemplate, DestinationEmptyTemplate, DestinationTemplate, GalleryTemplate, HomeTemplate,
    NotFoundTemplate, OtherDestinationView, ReviewsTemplate,
};

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (destinations, banner) = match state.content.list_destinations().await {
        Ok(rows) => (rows, None),
        Err(err) => {
            tracing::error!(error = %err, "destination list failed");
            (Vec::new(), Some(FlashView::error("Unable to load destinations right now")))
        }
    };
    let pending = flash::pending(&headers);
    let template = HomeTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        cards: viewmodel::decorate(&destinations)
            .into_iter()
            .map(Into::into)
            .collect(),
    };
    flash::render(&template, pending.is_some())
}

/// `/destination` without an id resolves to the newest destination and
/// redirects there, or shows the empty state when nothing exists yet.
pub async fn destination_latest(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (latest, banner) = match state.content.latest_destination().await {
        Ok(latest) => (latest, None),
        Err(err) => {
            tracing::error!(error = %err, "latest destination lookup failed");
            (None, Some(FlashView::error("Unable to load destinations right now")))
        }
    };
    match latest {
        Some(destination) => {
            Redirect::to(&format!("/destination/{}", destination.id)).into_response()
        }
        None => {
            let pending = flash::pending(&headers);
            let template = DestinationEmptyTemplate {
                flash: banner.or_else(|| pending.clone().map(Into::into)),
            };
            flash::render(&template, pending.is_some())
        }
    }
}

pub async fn destination_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    // Malformed ids get the same treatment as unknown ones.
    let Ok(id) = id.parse::<Uuid>() else {
        return flash::redirect_with("/destination", Flash::error("Destination not found"));
    };
    let destination = match state.content.destination(id).await {
        Ok(Some(destination)) => destination,
        Ok(None) => {
            return flash::redirect_with("/destination", Flash::error("Destination not found"));
        }
        Err(err) => {
            tracing::error!(error = %err, "destination fetch failed");
            return flash::redirect_with(
                "/destination",
                Flash::error("Unable to load that destination right now"),
            );
        }
    };

    // The sidebar is decoration; a failed fetch just leaves it empty.
    let others = state
        .content
        .list_destinations()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|d| d.id != destination.id)
        .take(3)
        .map(|d| OtherDestinationView {
            id: d.id.to_string(),
            name: d.name,
            location: d.location,
        })
        .collect();

    let pending = flash::pending(&headers);
    let template = DestinationTemplate {
        flash: pending.clone().map(Into::into),
        paragraphs: destination
            .full_description
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        image_url: crate::templates::image_or_placeholder(&destination.image_url),
        name: destination.name,
        location: destination.location,
        short_description: destination.short_description,
        map_url: destination.map_url,
        itineraries: itinerary::itineraries(),
        others,
    };
    flash::render(&template, pending.is_some())
}

pub async fn gallery(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (images, banner) = match state.content.gallery_images().await {
        Ok(rows) => (rows, None),
        Err(err) => {
            tracing::error!(error = %err, "gallery list failed");
            (Vec::new(), Some(FlashView::error("Unable to load the gallery right now")))
        }
    };
    let pending = flash::pending(&headers);
    let template = GalleryTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        images: images.iter().map(Into::into).collect(),
    };
    flash::render(&template, pending.is_some())
}

pub async fn reviews(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (reviews, banner) = match state.content.reviews().await {
        Ok(rows) => (rows, None),
        Err(err) => {
            tracing::error!(error = %err, "review list failed");
            (Vec::new(), Some(FlashView::error("Unable to load reviews right now")))
        }
    };
    let pending = flash::pending(&headers);
    let template = ReviewsTemplate {
        flash: banner.or_else(|| pending.clone().map(Into::into)),
        reviews: reviews.iter().map(Into::into).collect(),
    };
    flash::render(&template, pending.is_some())
}

pub async fn contact(headers: HeaderMap) -> Response {
    let pending = flash::pending(&headers);
    let template = ContactTemplate {
        flash: pending.clone().map(Into::into),
    };
    flash::render(&template, pending.is_some())
}

/// The contact form is acknowledgement-only: nothing is persisted or sent.
pub async fn send_contact() -> Response {
    flash::redirect_with(
        "/contact",
        Flash::success("Message sent! We will get back to you soon."),
    )
}

pub async fn not_found() -> Response {
    flash::render_with_status(StatusCode::NOT_FOUND, &NotFoundTemplate, false)
}
