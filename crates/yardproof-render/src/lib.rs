#![forbid(unsafe_code)]

pub mod batch;
pub mod frame;
pub mod svg;
pub mod theme;

pub use batch::{BatchReport, RenderFailure, RenderedFloorplan, render_batch};
pub use frame::CanvasFrame;
pub use svg::render_floorplan_svg;
pub use theme::{FillTheme, ThemeSource};

use yardproof_core::PipelineConfig;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout spec `{slug}`: {message}")]
    InvalidSpec { slug: String, message: String },
    #[error(transparent)]
    Config(#[from] yardproof_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub theme_source: ThemeSource,
}

impl RenderOptions {
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let key = "render.themeSource";
        let theme_source = config
            .str_or(key, "name")?
            .parse::<ThemeSource>()
            .map_err(|_| yardproof_core::Error::InvalidConfig {
                key: key.to_string(),
                message: "expected `name` or `spec`".to_string(),
            })?;
        Ok(Self { theme_source })
    }
}
