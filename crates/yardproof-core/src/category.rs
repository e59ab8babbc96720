use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BounceHouse,
    WaterSlide,
    Combo,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BounceHouse => "bounce_house",
            Self::WaterSlide => "water_slide",
            Self::Combo => "combo",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword table; the first row with any hit decides.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::BounceHouse,
        &["bounce house", "bouncer", "castle", "jumper"],
    ),
    (Category::WaterSlide, &["slide", "slip", "water"]),
    (Category::Combo, &["combo"]),
];

/// Classifies free text (case-insensitively) into exactly one category.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map_or(Category::Other, |(category, _)| *category)
}
