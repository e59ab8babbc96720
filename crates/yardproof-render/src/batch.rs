use crate::{RenderOptions, render_floorplan_svg};
use std::fmt::Display;
use yardproof_core::LayoutSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFloorplan {
    pub slug: String,
    pub svg: String,
}

/// An item that could not be rendered. `source` is the slug, or a file path when the spec
/// never made it into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFailure {
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub rendered: Vec<RenderedFloorplan>,
    pub failed: Vec<RenderFailure>,
}

impl BatchReport {
    pub fn push_failure(&mut self, source: impl Into<String>, err: &dyn Display) {
        let failure = RenderFailure {
            source: source.into(),
            message: err.to_string(),
        };
        tracing::warn!(source = %failure.source, error = %failure.message, "floorplan failed");
        self.failed.push(failure);
    }

    pub fn attempted(&self) -> usize {
        self.rendered.len() + self.failed.len()
    }

    /// Renders one spec into the report; a failure is recorded, never propagated.
    pub fn render_one(&mut self, spec: &LayoutSpec, options: &RenderOptions) {
        match render_floorplan_svg(spec, options) {
            Ok(svg) => self.rendered.push(RenderedFloorplan {
                slug: spec.slug.clone(),
                svg,
            }),
            Err(err) => self.push_failure(spec.slug.clone(), &err),
        }
    }
}

/// Renders every spec independently; one bad spec never stops the rest.
pub fn render_batch<'a>(
    specs: impl IntoIterator<Item = &'a LayoutSpec>,
    options: &RenderOptions,
) -> BatchReport {
    let mut report = BatchReport::default();
    for spec in specs {
        report.render_one(spec, options);
    }
    report
}
