//! Field-level validation for every mutation form.
//!
//! Runs client-side of the repository: a draft that fails here never causes
//! a network or database call. Repository constraints remain a secondary,
//! opaque backstop that surfaces as a generic failure.

use domains::error::FieldError;
use domains::models::{DestinationDraft, GalleryImageDraft, ProfileDraft, ReviewDraft};

pub const SHORT_DESCRIPTION_MIN: usize = 10;
pub const SHORT_DESCRIPTION_MAX: usize = 200;
pub const FULL_DESCRIPTION_MIN: usize = 50;
pub const NAME_MIN: usize = 2;

/// Syntactic URL check: http(s) scheme, a non-empty host, no whitespace.
/// Deliberately shallow — reachability is not our business.
pub fn is_valid_url(value: &str) -> bool {
    let rest = match value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    if rest.contains(char::is_whitespace) {
        return false;
    }
    let host = rest.split('/').next().unwrap_or("");
    !host.is_empty()
}

/// Image and map fields accept either a valid URL or the empty string.
pub fn is_url_or_empty(value: &str) -> bool {
    value.is_empty() || is_valid_url(value)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_destination(draft: &DestinationDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if char_len(draft.name.trim()) < NAME_MIN {
        errors.push(FieldError::new(
            "name",
            format!("Name must be at least {NAME_MIN} characters"),
        ));
    }
    if char_len(draft.location.trim()) < NAME_MIN {
        errors.push(FieldError::new(
            "location",
            format!("Location must be at least {NAME_MIN} characters"),
        ));
    }
    let short = char_len(&draft.short_description);
    if short < SHORT_DESCRIPTION_MIN {
        errors.push(FieldError::new(
            "short_description",
            format!("Short description must be at least {SHORT_DESCRIPTION_MIN} characters"),
        ));
    } else if short > SHORT_DESCRIPTION_MAX {
        errors.push(FieldError::new(
            "short_description",
            format!("Short description must be less than {SHORT_DESCRIPTION_MAX} characters"),
        ));
    }
    if char_len(&draft.full_description) < FULL_DESCRIPTION_MIN {
        errors.push(FieldError::new(
            "full_description",
            format!("Full description must be at least {FULL_DESCRIPTION_MIN} characters"),
        ));
    }
    if !is_url_or_empty(&draft.image_url) {
        errors.push(FieldError::new("image_url", "Must be a valid URL"));
    }
    if !is_url_or_empty(&draft.map_url) {
        errors.push(FieldError::new("map_url", "Must be a valid URL"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_gallery_image(draft: &GalleryImageDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }
    if !is_valid_url(&draft.image_url) && !draft.image_url.starts_with('/') {
        // Locally stored objects carry site-relative URLs.
        errors.push(FieldError::new("image_url", "Image is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_review(draft: &ReviewDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }
    if draft.content.trim().is_empty() {
        errors.push(FieldError::new("content", "Review content is required"));
    }
    if !(1..=5).contains(&draft.rating) {
        errors.push(FieldError::new("rating", "Rating must be between 1 and 5"));
    }
    if let Some(url) = draft.image_url.as_deref() {
        if !is_url_or_empty(url) {
            errors.push(FieldError::new("image_url", "Must be a valid URL"));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_profile(draft: &ProfileDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if char_len(draft.full_name.trim()) < NAME_MIN {
        errors.push(FieldError::new(
            "full_name",
            format!("Full name must be at least {NAME_MIN} characters"),
        ));
    }
    if !is_url_or_empty(&draft.avatar_url) {
        errors.push(FieldError::new("avatar_url", "Must be a valid URL"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Login form rules: a plausible email and a password of at least
/// 6 characters.
pub fn validate_login(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    let at = email.find('@');
    let plausible = matches!(at, Some(pos) if pos > 0 && email[pos + 1..].contains('.'));
    if !plausible {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }
    if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_destination() -> DestinationDraft {
        DestinationDraft {
            name: "Test Falls".to_string(),
            location: "X Province".to_string(),
            short_description: "A lovely short description.".to_string(),
            full_description: "A full description comfortably longer than fifty characters in total."
                .to_string(),
            image_url: String::new(),
            map_url: String::new(),
        }
    }

    #[test]
    fn accepts_a_well_formed_destination() {
        assert!(validate_destination(&valid_destination()).is_ok());
    }

    #[test]
    fn short_description_bounds_are_enforced() {
        let mut draft = valid_destination();
        draft.short_description = "too short".to_string(); // 9 chars
        let errors = validate_destination(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "short_description"));

        draft.short_description = "x".repeat(201);
        let errors = validate_destination(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "short_description"));

        draft.short_description = "x".repeat(200);
        assert!(validate_destination(&draft).is_ok());
    }

    #[test]
    fn full_description_requires_fifty_characters() {
        let mut draft = valid_destination();
        draft.full_description = "x".repeat(49);
        let errors = validate_destination(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "full_description");
    }

    #[test]
    fn url_fields_accept_empty_but_reject_garbage() {
        let mut draft = valid_destination();
        draft.image_url = String::new();
        draft.map_url = "https://www.google.com/maps/embed?pb=abc".to_string();
        assert!(validate_destination(&draft).is_ok());

        draft.image_url = "not-a-url".to_string();
        let errors = validate_destination(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "image_url"));
    }

    #[test]
    fn url_syntax_check() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/a/b.jpg"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https://exa mple.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn review_rating_must_be_one_to_five() {
        let draft = ReviewDraft {
            title: "Great trip".to_string(),
            content: "Saw elephants at dawn.".to_string(),
            rating: 6,
            location: None,
            image_url: None,
        };
        let errors = validate_review(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "rating"));
    }

    #[test]
    fn gallery_title_is_required() {
        let draft = GalleryImageDraft {
            title: "  ".to_string(),
            image_url: "/media/gallery/abc.jpg".to_string(),
            ..Default::default()
        };
        let errors = validate_gallery_image(&draft).unwrap_err();
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn login_rules() {
        assert!(validate_login("admin@wildtrails.example", "safari-pass").is_ok());
        assert!(validate_login("not-an-email", "safari-pass").is_err());
        assert!(validate_login("admin@wildtrails.example", "short").is_err());
    }
}
