//! Layout specs: one per bounce house, keyed by slug.

use crate::{Category, Dimensions, ProductRecord};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFeature {
    pub side: Side,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub side: Side,
    pub label: String,
    pub width_ft: f64,
}

fn default_pipe_pct() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlowerPipe {
    pub side: Side,
    pub label: String,
    /// Position along the edge, as a fraction of the footprint width.
    #[serde(default = "default_pipe_pct")]
    pub x_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x_pct: f64,
    pub y_pct: f64,
}

fn default_theme() -> String {
    "standard".to_string()
}

/// Normalized layout of one inflatable.
///
/// `theme` is carried for downstream consumers; the renderer derives its fill from `label`
/// unless told otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub slug: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub id: Option<u32>,

    pub width_ft: f64,
    pub height_ft: f64,
    pub setup_area_sq_ft: f64,

    pub actual_width_ft: f64,
    pub actual_height_ft: f64,
    pub actual_size_sq_ft: f64,

    #[serde(default)]
    pub entrance: Option<EdgeFeature>,
    #[serde(default)]
    pub ramp: Option<Ramp>,
    #[serde(default)]
    pub blower_pipes: Vec<BlowerPipe>,
    #[serde(default)]
    pub anchors: Vec<Anchor>,

    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl LayoutSpec {
    /// Diagram title: the product name, or the slug for specs written without one.
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.slug)
    }
}

/// Maps a listing's `length x width` onto the drawing plane.
///
/// Listing length runs along the canvas x axis (`width_ft`); listing width runs along the
/// canvas y axis (`height_ft`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasAxes {
    pub width_ft: f64,
    pub height_ft: f64,
    pub area_sq_ft: f64,
}

impl CanvasAxes {
    pub fn from_dimensions(dims: &Dimensions) -> Self {
        Self {
            width_ft: dims.length,
            height_ft: dims.width,
            area_sq_ft: dims.area,
        }
    }
}

pub const RAMP_WIDTH_FT: f64 = 8.0;
pub const BLOWER_PIPE_POSITIONS: [f64; 2] = [0.35, 0.65];
pub const ANCHOR_INSET_X: f64 = 0.08;
pub const ANCHOR_INSET_Y: f64 = 0.12;

fn bounce_house_anchors() -> Vec<Anchor> {
    let (near_x, far_x) = (ANCHOR_INSET_X, 1.0 - ANCHOR_INSET_X);
    let (near_y, far_y) = (ANCHOR_INSET_Y, 1.0 - ANCHOR_INSET_Y);
    vec![
        Anchor { x_pct: near_x, y_pct: near_y },
        Anchor { x_pct: far_x, y_pct: near_y },
        Anchor { x_pct: near_x, y_pct: far_y },
        Anchor { x_pct: far_x, y_pct: far_y },
    ]
}

fn slug_strip_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid regex"))
}

fn slug_collapse_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-\s]+").expect("valid regex"))
}

/// `Frozen Castle Jump!` -> `frozen-castle-jump`.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = slug_strip_regex().replace_all(&lower, "");
    let collapsed = slug_collapse_regex().replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Builds the fixed bounce-house layout for `record`.
///
/// Fails with [`crate::Error::MissingDimensions`] instead of inventing a footprint, and with
/// [`crate::Error::EmptySlug`] when the name would give a nameless spec file.
pub fn build_spec(record: &ProductRecord) -> crate::Result<LayoutSpec> {
    let missing = |field: &'static str| crate::Error::MissingDimensions {
        id: record.id,
        name: record.name.clone(),
        field,
    };
    let setup = record
        .setup_area
        .as_ref()
        .map(CanvasAxes::from_dimensions)
        .ok_or_else(|| missing("setup_area"))?;
    let actual = record
        .actual_size
        .as_ref()
        .map(CanvasAxes::from_dimensions)
        .ok_or_else(|| missing("actual_size"))?;
    let slug = slugify(&record.name);
    if slug.is_empty() {
        return Err(crate::Error::EmptySlug {
            id: record.id,
            name: record.name.clone(),
        });
    }

    Ok(LayoutSpec {
        slug,
        label: Some(record.name.clone()),
        id: Some(record.id),
        width_ft: setup.width_ft,
        height_ft: setup.height_ft,
        setup_area_sq_ft: setup.area_sq_ft,
        actual_width_ft: actual.width_ft,
        actual_height_ft: actual.height_ft,
        actual_size_sq_ft: actual.area_sq_ft,
        entrance: Some(EdgeFeature {
            side: Side::Bottom,
            label: "Entrance / Exit".to_string(),
        }),
        ramp: Some(Ramp {
            side: Side::Bottom,
            label: "Ramp".to_string(),
            width_ft: RAMP_WIDTH_FT,
        }),
        blower_pipes: BLOWER_PIPE_POSITIONS
            .iter()
            .map(|&x_pct| BlowerPipe {
                side: Side::Top,
                label: "Blower Pipe".to_string(),
                x_pct,
            })
            .collect(),
        anchors: bounce_house_anchors(),
        category: Some(record.category),
        theme: default_theme(),
    })
}

/// Specs keyed by slug in first-seen order; a repeated slug keeps the last record's spec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecCatalog {
    pub specs: IndexMap<String, LayoutSpec>,
    /// Slugs that were produced more than once, in the order the repeats were seen.
    pub collisions: Vec<String>,
    /// Records skipped because they are not bounce houses.
    pub skipped: usize,
    /// Bounce houses whose name slugifies to nothing.
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub id: u32,
    pub name: String,
    pub message: String,
}

/// Promotes every bounce house in `records` to a spec.
///
/// Aborts on the first record that violates the dimension precondition. Records without a
/// usable slug are collected in [`SpecCatalog::rejected`] and the rest still get specs.
pub fn build_specs(records: &[ProductRecord]) -> crate::Result<SpecCatalog> {
    let mut catalog = SpecCatalog::default();
    for record in records {
        if !record.is_bounce_house() {
            catalog.skipped += 1;
            continue;
        }
        let spec = match build_spec(record) {
            Ok(spec) => spec,
            Err(err @ crate::Error::EmptySlug { .. }) => {
                catalog.rejected.push(RejectedRecord {
                    id: record.id,
                    name: record.name.clone(),
                    message: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };
        if let Some(previous) = catalog.specs.insert(spec.slug.clone(), spec) {
            catalog.collisions.push(previous.slug);
        }
    }
    Ok(catalog)
}
