//! Display-only decoration of destination cards.
//!
//! The public card grid shows category tags, ratings, and placeholder prices
//! that are not persisted anywhere: they are computed deterministically from
//! row position. Keeping the mapping here, on a type separate from
//! [`Destination`], makes it obvious these fields never round-trip to
//! storage.

use domains::models::Destination;
use uuid::Uuid;

const CATEGORIES: [&str; 3] = ["restaurants", "activity", "hotel"];
const RATINGS: [f32; 4] = [5.0, 4.5, 3.9, 0.0];
const PLACEHOLDER_PRICE: &str = "$500/month";

/// What a card in the public grid renders. Never written back.
#[derive(Debug, Clone)]
pub struct DestinationCard {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub short_description: String,
    pub image_url: String,
    pub category: &'static str,
    pub featured: bool,
    pub price: &'static str,
    pub reviews_count: u32,
    pub rating: f32,
}

/// Maps persisted rows to decorated cards, preserving order.
pub fn decorate(destinations: &[Destination]) -> Vec<DestinationCard> {
    destinations
        .iter()
        .enumerate()
        .map(|(i, d)| DestinationCard {
            id: d.id,
            name: d.name.clone(),
            location: d.location.clone(),
            short_description: d.short_description.clone(),
            image_url: d.image_url.clone(),
            category: CATEGORIES[i % CATEGORIES.len()],
            featured: i % 2 == 0,
            price: PLACEHOLDER_PRICE,
            reviews_count: ((i + 2) % 4) as u32,
            rating: RATINGS[i % RATINGS.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn destination(name: &str) -> Destination {
        Destination {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: "North Central Province".to_string(),
            short_description: "A paradise for wildlife.".to_string(),
            full_description: "x".repeat(60),
            image_url: String::new(),
            map_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn decorations_are_deterministic_in_row_position() {
        let rows: Vec<_> = (0..5).map(|i| destination(&format!("d{i}"))).collect();
        let cards = decorate(&rows);

        assert_eq!(cards[0].category, "restaurants");
        assert_eq!(cards[1].category, "activity");
        assert_eq!(cards[2].category, "hotel");
        assert_eq!(cards[3].category, "restaurants");

        assert!(cards[0].featured);
        assert!(!cards[1].featured);

        assert_eq!(cards[0].rating, 5.0);
        assert_eq!(cards[3].rating, 0.0);
        assert_eq!(cards[0].reviews_count, 2);
        assert_eq!(cards[2].reviews_count, 0);
    }

    #[test]
    fn order_and_identity_are_preserved() {
        let rows = vec![destination("first"), destination("second")];
        let cards = decorate(&rows);
        assert_eq!(cards[0].id, rows[0].id);
        assert_eq!(cards[1].name, "second");
    }
}
