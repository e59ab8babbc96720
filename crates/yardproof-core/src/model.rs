use crate::{Category, Dimensions};
use serde::{Deserialize, Serialize};

/// One product pulled out of a listing page.
///
/// Extraction only emits records with both dimension blocks present; the fields stay optional
/// because catalogs are also read back from JSON written by other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u32,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub setup_area: Option<Dimensions>,
    #[serde(default)]
    pub actual_size: Option<Dimensions>,
}

impl ProductRecord {
    pub fn is_bounce_house(&self) -> bool {
        self.category == Category::BounceHouse
    }
}
