#![forbid(unsafe_code)]

//! `yardproof` turns inflatable rental listings into to-scale SVG floorplans.
//!
//! The pipeline runs strictly forward: listing text -> product catalog -> layout specs ->
//! floorplans. Each stage is usable on its own; [`Pipeline`] chains them and [`store`] persists
//! the artifacts in between.
//!
//! # Features
//!
//! - `render` (default): enable SVG rendering (`yardproof::render`) and the render stages of
//!   [`Pipeline`]

pub use yardproof_core::*;

mod pipeline;
pub mod store;
pub mod summary;

pub use pipeline::{BuildReport, OutputPaths, Pipeline};
pub use store::StoreError;

#[cfg(feature = "render")]
pub mod render {
    pub use yardproof_render::{
        BatchReport, CanvasFrame, FillTheme, RenderFailure, RenderOptions, RenderedFloorplan,
        ThemeSource, render_batch, render_floorplan_svg,
    };
}

#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Core(#[from] yardproof_core::Error),
    #[cfg(feature = "render")]
    #[error(transparent)]
    Render(#[from] yardproof_render::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type HeadlessResult<T> = std::result::Result<T, HeadlessError>;
