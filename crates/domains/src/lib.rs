//! The central domain models and interface definitions for Wildtrails.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    #[test]
    fn destination_draft_defaults_are_empty() {
        let draft = DestinationDraft::default();
        assert!(draft.name.is_empty());
        assert!(draft.image_url.is_empty());
    }

    #[test]
    fn gallery_image_round_trips_through_json() {
        let image = GalleryImage {
            id: Uuid::new_v4(),
            title: "Elephant herd at dusk".to_string(),
            description: None,
            image_url: "/media/gallery/abc.jpg".to_string(),
            tags: vec!["wildlife".to_string(), "wildlife".to_string()],
            location: Some("Hurulu Eco Park".to_string()),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&image).unwrap();
        let back: GalleryImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, image.id);
        // Tags are stored as-is: duplicates survive.
        assert_eq!(back.tags.len(), 2);
    }
}
