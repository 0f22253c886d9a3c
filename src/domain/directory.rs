//! Businesses featured on the directory page.

use crate::domain::model::{BusinessRecord, Catalog, ReviewRecord};

fn review(author: &str, rating: f64, text: &str) -> ReviewRecord {
    ReviewRecord {
        author: author.to_string(),
        rating,
        text: text.to_string(),
    }
}

fn business(
    name: &str,
    category: &str,
    summary: &str,
    average: f64,
    review_count: u32,
    reviews: Vec<ReviewRecord>,
) -> BusinessRecord {
    BusinessRecord {
        name: name.to_string(),
        category: category.to_string(),
        summary: summary.to_string(),
        average,
        review_count,
        reviews,
    }
}

pub fn builtin_catalog() -> Catalog {
    [
        (
            "bella-bistro",
            business(
                "Bella Bistro",
                "Restaurant",
                "Guests rave about the candle-lit ambiance, seasonal pasta specials, and staff who remember regulars by name.",
                4.6,
                128,
                vec![
                    review(
                        "Ava M.",
                        5.0,
                        "Best date-night spot downtown. The truffle ravioli is unreal and they always have great wine pairings!",
                    ),
                    review(
                        "Marcus L.",
                        4.0,
                        "Service was attentive and friendly. Portion sizes are generous\u{2014}come hungry!",
                    ),
                ],
            ),
        ),
        (
            "green-garden",
            business(
                "Green Garden",
                "Plant Shop",
                "Beloved by plant parents for curated greenery, Saturday workshops, and troubleshooting help that actually works.",
                4.8,
                86,
                vec![
                    review(
                        "Sasha W.",
                        5.0,
                        "They helped me nurse my fiddle-leaf fig back to health. Amazing knowledge and lovely vibe!",
                    ),
                    review(
                        "Ian R.",
                        4.0,
                        "Great selection of rare plants and the staff will literally repot for you if you ask nicely.",
                    ),
                ],
            ),
        ),
        (
            "sparkle-cleaners",
            business(
                "Sparkle Cleaners",
                "Home Services",
                "Customers mention spotless kitchens, flexible scheduling, and the reusable products they leave behind for you.",
                4.4,
                54,
                vec![
                    review(
                        "Priya K.",
                        4.0,
                        "Booked a move-out clean and the place looked brand new. Appreciate the eco-friendly supplies!",
                    ),
                    review(
                        "Jackson P.",
                        5.0,
                        "Team was fast, thorough, and professional. They even left a personalized checklist for maintenance.",
                    ),
                ],
            ),
        ),
        (
            "sunrise-fitness",
            business(
                "Sunrise Fitness",
                "Wellness Studio",
                "Praised for upbeat trainers, playlists that energize early mornings, and small group classes that feel personal.",
                4.7,
                112,
                vec![
                    review(
                        "Linh D.",
                        5.0,
                        "Love the sunrise HIIT sessions. Trainers know everyone's name and keep things fun!",
                    ),
                    review(
                        "Caroline S.",
                        4.0,
                        "Clean facilities, easy parking, and they offer great nutrition tips after class.",
                    ),
                ],
            ),
        ),
    ]
    .into_iter()
    .collect()
}
