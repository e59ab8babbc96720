use regex::Regex;
use serde::{Deserialize, Serialize};

/// Physical footprint in feet.
///
/// `area` is always `length * width`. It is recomputed on deserialization, so a stored value
/// (including the legacy `sq_ft` key) is never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DimensionsRepr")]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: Option<f64>,
    pub area: f64,
}

#[derive(Deserialize)]
struct DimensionsRepr {
    length: f64,
    width: f64,
    #[serde(default)]
    height: Option<f64>,
}

impl From<DimensionsRepr> for Dimensions {
    fn from(value: DimensionsRepr) -> Self {
        Self::new(value.length, value.width, value.height)
    }
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: Option<f64>) -> Self {
        Self {
            length,
            width,
            height,
            area: length * width,
        }
    }
}

fn number_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("valid regex"))
}

/// Folds the typographic glyphs vendors mix into dimension strings down to ASCII.
pub fn normalize_glyphs(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{2032}' | '\u{2019}' => '\'',
            '\u{2033}' | '\u{201D}' => '"',
            '\u{00D7}' => 'x',
            other => other,
        })
        .collect()
}

/// Parses strings like `20′ L × 20′ W × 21′ H`.
///
/// The first three numbers are length, width and height; anything after the third is ignored.
/// Fewer than two numbers yields `None`.
pub fn parse_dimensions(text: &str) -> Option<Dimensions> {
    let normalized = normalize_glyphs(text);
    let mut numbers = number_regex()
        .find_iter(&normalized)
        .filter_map(|m| m.as_str().parse::<f64>().ok());

    let length = numbers.next()?;
    let width = numbers.next()?;
    let height = numbers.next();
    Some(Dimensions::new(length, width, height))
}
