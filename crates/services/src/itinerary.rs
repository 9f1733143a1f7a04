//! Static itinerary reference data for the destination detail page.
//!
//! Itineraries are editorial content, not fetched: the detail view renders
//! the same three packages for every destination.

use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Itinerary {
    pub title: &'static str,
    pub description: &'static str,
    pub activities: &'static [&'static str],
    pub price: &'static str,
}

static ITINERARIES: Lazy<Vec<Itinerary>> = Lazy::new(|| {
    vec![
        Itinerary {
            title: "1-Day Safari Adventure",
            description: "Perfect for a quick visit to experience the local wildlife.",
            activities: &[
                "Early morning safari ride to spot elephants and other wildlife",
                "Picnic lunch by the reservoir",
                "Bird watching in the evening",
                "Sunset viewing point",
            ],
            price: "$50-100 per person",
        },
        Itinerary {
            title: "2-Day Nature Immersion",
            description: "A more comprehensive experience with overnight camping.",
            activities: &[
                "Day 1: Morning safari, nature walk, and afternoon relaxation",
                "Day 1 Evening: Campfire dinner and stargazing",
                "Day 2: Sunrise photography, second safari ride, local village visit",
                "Day 2 Evening: Cultural performance and farewell dinner",
            ],
            price: "$150-250 per person",
        },
        Itinerary {
            title: "5-Day Complete Adventure",
            description: "The ultimate experience including nearby attractions.",
            activities: &[
                "Days 1-2: Comprehensive exploration with multiple safaris",
                "Day 3: Visit to Ritigala Ancient Monastery and nature walks",
                "Day 4: Minneriya or Kaudulla National Park excursion",
                "Day 5: Cultural sites visit and local cuisine experience",
            ],
            price: "$400-650 per person",
        },
    ]
});

pub fn itineraries() -> &'static [Itinerary] {
    &ITINERARIES
}
