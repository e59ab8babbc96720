use crate::store;
use crate::HeadlessResult;
use std::path::{Path, PathBuf};
use yardproof_core::{
    ExtractOptions, ExtractReport, Extractor, PipelineConfig, ProductRecord, RejectedRecord,
    SpecCatalog,
};

#[cfg(feature = "render")]
use yardproof_core::LayoutSpec;
#[cfg(feature = "render")]
use yardproof_render::{BatchReport, RenderOptions};

/// Where `Pipeline::build` puts each stage's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub products: PathBuf,
    pub specs_dir: PathBuf,
    pub floorplans_dir: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            products: PathBuf::from("products.json"),
            specs_dir: PathBuf::from("inflatables"),
            floorplans_dir: PathBuf::from("output/floorplans"),
        }
    }
}

/// Counts from one end-to-end run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub markers_found: usize,
    pub products: usize,
    pub specs_written: usize,
    pub collisions: Vec<String>,
    /// Bounce houses that got no spec because their name has no slug characters.
    pub rejected: Vec<RejectedRecord>,
    pub rendered: usize,
    pub failed: usize,
}

/// Drives extraction, spec synthesis and rendering with one resolved configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    extract: ExtractOptions,
    #[cfg(feature = "render")]
    render: RenderOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            config: PipelineConfig::default(),
            extract: ExtractOptions::default(),
            #[cfg(feature = "render")]
            render: RenderOptions::default(),
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves typed options from `config`; bad keys fail here rather than mid-run.
    pub fn with_config(config: PipelineConfig) -> HeadlessResult<Self> {
        let extract = ExtractOptions::from_config(&config)?;
        #[cfg(feature = "render")]
        let render = RenderOptions::from_config(&config)?;
        Ok(Self {
            config,
            extract,
            #[cfg(feature = "render")]
            render,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract
    }

    pub fn extract(&self, text: &str) -> ExtractReport {
        let report = Extractor::new(self.extract).extract(text);
        tracing::info!(
            markers = report.markers_found,
            retained = report.records.len(),
            discarded = report.discarded(),
            strategy = ?self.extract.strategy,
            "extracted products"
        );
        report
    }

    pub fn build_specs(&self, records: &[ProductRecord]) -> HeadlessResult<SpecCatalog> {
        let catalog = yardproof_core::build_specs(records)?;
        for slug in &catalog.collisions {
            tracing::warn!(slug = %slug, "slug collision; later product replaces earlier spec");
        }
        for rejected in &catalog.rejected {
            tracing::warn!(
                id = rejected.id,
                name = %rejected.name,
                "product has no usable slug; no spec written"
            );
        }
        tracing::info!(
            count = catalog.specs.len(),
            skipped = catalog.skipped,
            collisions = catalog.collisions.len(),
            rejected = catalog.rejected.len(),
            "built layout specs"
        );
        Ok(catalog)
    }

    /// Builds specs from `records` and writes one file per slug into `dir`.
    pub fn write_specs(&self, records: &[ProductRecord], dir: &Path) -> HeadlessResult<SpecCatalog> {
        let catalog = self.build_specs(records)?;
        store::write_specs(dir, catalog.specs.values())?;
        Ok(catalog)
    }
}

#[cfg(feature = "render")]
impl Pipeline {
    pub fn render_options(&self) -> &RenderOptions {
        &self.render
    }

    pub fn render_specs<'a>(&self, specs: impl IntoIterator<Item = &'a LayoutSpec>) -> BatchReport {
        let report = yardproof_render::render_batch(specs, &self.render);
        tracing::info!(
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            "rendered floorplans"
        );
        report
    }

    /// Renders every spec file in `specs_dir` into `out_dir`.
    ///
    /// Files that fail to load or render are recorded in the report and skipped. Write
    /// failures abort the run.
    pub fn render_spec_dir(&self, specs_dir: &Path, out_dir: &Path) -> HeadlessResult<BatchReport> {
        let mut report = BatchReport::default();
        for (path, loaded) in store::read_spec_dir(specs_dir)? {
            match loaded {
                Ok(spec) => report.render_one(&spec, &self.render),
                Err(err) => report.push_failure(path.display().to_string(), &err),
            }
        }
        for floorplan in &report.rendered {
            store::write_svg(out_dir, &floorplan.slug, &floorplan.svg)?;
        }
        tracing::info!(
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            out_dir = %out_dir.display(),
            "rendered floorplans"
        );
        Ok(report)
    }

    /// Runs all three stages over one listing and persists every artifact under `paths`.
    pub fn build(&self, listing: &str, paths: &OutputPaths) -> HeadlessResult<BuildReport> {
        let extracted = self.extract(listing);
        store::write_products(&paths.products, &extracted.records)?;

        let catalog = self.write_specs(&extracted.records, &paths.specs_dir)?;
        let batch = self.render_spec_dir(&paths.specs_dir, &paths.floorplans_dir)?;

        Ok(BuildReport {
            markers_found: extracted.markers_found,
            products: extracted.records.len(),
            specs_written: catalog.specs.len(),
            collisions: catalog.collisions,
            rejected: catalog.rejected,
            rendered: batch.rendered.len(),
            failed: batch.failed.len(),
        })
    }
}
