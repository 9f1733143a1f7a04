//! Askama templates and the small view structs they render.
//!
//! Everything a template touches is precomputed here as plain strings and
//! flags, so the HTML stays dumb and the fallbacks (placeholder image, star
//! strings, date formatting) live in one place.

use askama::Template;

use domains::error::FieldError;
use domains::models::{ContentCounts, Destination, GalleryImage, Review};
use services::itinerary::Itinerary;
use services::viewmodel::DestinationCard;

use crate::flash::FlashView;

/// Hero/card fallback when a row has no image yet.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e";

pub fn image_or_placeholder(url: &str) -> String {
    if url.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        url.to_string()
    }
}

/// "★★★★☆" for a 1–5 rating, clamped.
pub fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

fn short_date(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

// ── Public view structs ─────────────────────────────────────────────────

pub struct CardView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub image_url: String,
    pub category: &'static str,
    pub featured: bool,
    pub price: &'static str,
    pub rating: String,
    pub reviews_count: u32,
}

impl From<DestinationCard> for CardView {
    fn from(card: DestinationCard) -> Self {
        Self {
            id: card.id.to_string(),
            image_url: image_or_placeholder(&card.image_url),
            name: card.name,
            location: card.location,
            short_description: card.short_description,
            category: card.category,
            featured: card.featured,
            price: card.price,
            rating: format!("{:.1}", card.rating),
            reviews_count: card.reviews_count,
        }
    }
}

pub struct GalleryCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub location: String,
    pub created: String,
}

impl From<&GalleryImage> for GalleryCardView {
    fn from(image: &GalleryImage) -> Self {
        Self {
            id: image.id.to_string(),
            title: image.title.clone(),
            description: image.description.clone().unwrap_or_default(),
            image_url: image.image_url.clone(),
            tags: image.tags.clone(),
            location: image.location.clone().unwrap_or_default(),
            created: short_date(&image.created_at),
        }
    }
}

pub struct ReviewCardView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub stars: String,
    pub location: String,
    pub image_url: String,
    pub created: String,
}

impl From<&Review> for ReviewCardView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            title: review.title.clone(),
            content: review.content.clone(),
            stars: stars(review.rating),
            location: review.location.clone().unwrap_or_default(),
            image_url: review.image_url.clone().unwrap_or_default(),
            created: short_date(&review.created_at),
        }
    }
}

pub struct OtherDestinationView {
    pub id: String,
    pub name: String,
    pub location: String,
}

// ── Form value structs (round-trip user input on errors) ───────────────

#[derive(Default, Clone)]
pub struct DestinationFormView {
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub full_description: String,
    pub image_url: String,
    pub map_url: String,
}

impl From<&Destination> for DestinationFormView {
    fn from(d: &Destination) -> Self {
        Self {
            name: d.name.clone(),
            location: d.location.clone(),
            short_description: d.short_description.clone(),
            full_description: d.full_description.clone(),
            image_url: d.image_url.clone(),
            map_url: d.map_url.clone(),
        }
    }
}

#[derive(Default, Clone)]
pub struct GalleryFormView {
    pub title: String,
    pub description: String,
    pub location: String,
    pub tags: String,
}

#[derive(Default, Clone)]
pub struct ReviewFormView {
    pub title: String,
    pub content: String,
    pub rating: String,
    pub location: String,
    pub image_url: String,
}

#[derive(Default, Clone)]
pub struct ProfileFormView {
    pub full_name: String,
    pub bio: String,
    pub avatar_url: String,
}

pub struct AdminDestinationRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub image_url: String,
}

impl From<&Destination> for AdminDestinationRow {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            location: d.location.clone(),
            short_description: d.short_description.clone(),
            image_url: image_or_placeholder(&d.image_url),
        }
    }
}

// ── Public pages ────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub flash: Option<FlashView>,
    pub cards: Vec<CardView>,
}

#[derive(Template)]
#[template(path = "destination.html")]
pub struct DestinationTemplate {
    pub flash: Option<FlashView>,
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub paragraphs: Vec<String>,
    pub image_url: String,
    pub map_url: String,
    pub itineraries: &'static [Itinerary],
    pub others: Vec<OtherDestinationView>,
}

#[derive(Template)]
#[template(path = "destination_empty.html")]
pub struct DestinationEmptyTemplate {
    pub flash: Option<FlashView>,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub flash: Option<FlashView>,
    pub images: Vec<GalleryCardView>,
}

#[derive(Template)]
#[template(path = "reviews.html")]
pub struct ReviewsTemplate {
    pub flash: Option<FlashView>,
    pub reviews: Vec<ReviewCardView>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub flash: Option<FlashView>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

// ── Admin pages ─────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub flash: Option<FlashView>,
    pub error: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub flash: Option<FlashView>,
    pub counts: ContentCounts,
}

#[derive(Template)]
#[template(path = "admin/destinations.html")]
pub struct AdminDestinationsTemplate {
    pub flash: Option<FlashView>,
    pub rows: Vec<AdminDestinationRow>,
}

#[derive(Template)]
#[template(path = "admin/destination_form.html")]
pub struct DestinationFormTemplate {
    pub flash: Option<FlashView>,
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub values: DestinationFormView,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "admin/gallery.html")]
pub struct AdminGalleryTemplate {
    pub flash: Option<FlashView>,
    pub errors: Vec<FieldError>,
    pub values: GalleryFormView,
    pub images: Vec<GalleryCardView>,
}

#[derive(Template)]
#[template(path = "admin/reviews.html")]
pub struct AdminReviewsTemplate {
    pub flash: Option<FlashView>,
    pub errors: Vec<FieldError>,
    pub values: ReviewFormView,
    pub reviews: Vec<ReviewCardView>,
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub flash: Option<FlashView>,
    pub errors: Vec<FieldError>,
    pub email: String,
    pub values: ProfileFormView,
}

#[derive(Template)]
#[template(path = "admin/denied.html")]
pub struct DeniedTemplate {
    pub email: String,
}

#[derive(Template)]
#[template(path = "admin/not_found.html")]
pub struct AdminNotFoundTemplate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_clamp_and_render() {
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn denied_panel_shows_the_email() {
        let html = DeniedTemplate {
            email: "guide@wildtrails.example".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("guide@wildtrails.example"));
        assert!(html.contains("/admin/logout"));
    }

    #[test]
    fn form_template_round_trips_entered_values() {
        let html = DestinationFormTemplate {
            flash: None,
            heading: "Add New Destination".to_string(),
            action: "/admin/destinations/add".to_string(),
            submit_label: "Create Destination".to_string(),
            values: DestinationFormView {
                name: "Test Falls".to_string(),
                short_description: "short".to_string(),
                ..Default::default()
            },
            errors: vec![FieldError::new(
                "short_description",
                "Short description must be at least 10 characters",
            )],
        }
        .render()
        .unwrap();
        assert!(html.contains("Test Falls"));
        assert!(html.contains("at least 10 characters"));
    }

    #[test]
    fn missing_image_gets_the_placeholder() {
        assert_eq!(image_or_placeholder(""), PLACEHOLDER_IMAGE);
        assert_eq!(image_or_placeholder("/media/x.jpg"), "/media/x.jpg");
    }
}
