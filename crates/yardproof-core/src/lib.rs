#![forbid(unsafe_code)]

//! Product extraction and layout-spec synthesis (headless, no I/O).
//!
//! The pipeline runs strictly forward:
//! - raw listing text -> [`ProductRecord`]s ([`extract`])
//! - product records -> [`LayoutSpec`]s ([`spec`])
//!
//! Rendering lives in `yardproof-render`; reading and writing files lives in the `yardproof`
//! facade.

pub mod category;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod extract;
pub mod model;
pub mod spec;
pub mod text;
pub mod yard;

pub use category::{Category, classify};
pub use config::PipelineConfig;
pub use dimensions::{Dimensions, parse_dimensions};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, ExtractReport, ExtractStrategy, Extractor, extract_products};
pub use model::ProductRecord;
pub use spec::{
    Anchor, BlowerPipe, CanvasAxes, EdgeFeature, LayoutSpec, Ramp, RejectedRecord, Side, SpecCatalog,
    build_spec, build_specs, slugify,
};
pub use yard::{Yard, YardUsage};

#[cfg(test)]
mod tests;
