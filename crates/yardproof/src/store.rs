//! Reading and writing the pipeline's on-disk artifacts.
//!
//! Layout mirrors the stage boundaries: a product catalog JSON array, a directory of
//! `<slug>.json` layout specs, and a directory of `<slug>.svg` floorplans.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use yardproof_core::{LayoutSpec, ProductRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in `{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("spec for {label:?} has an empty slug; not writing it into `{}`", dir.display())]
    EmptySlug { dir: PathBuf, label: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_err(path: &Path) -> impl FnOnce(serde_json::Error) -> StoreError + '_ {
    move |source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(io_err(dir))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    serde_json::from_str(&text).map_err(json_err(path))
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut text = serde_json::to_string_pretty(value).map_err(json_err(path))?;
    text.push('\n');
    fs::write(path, text).map_err(io_err(path))?;
    tracing::debug!(path = %path.display(), "wrote json");
    Ok(())
}

pub fn read_products(path: &Path) -> Result<Vec<ProductRecord>> {
    read_json(path)
}

/// Writes the full catalog (every category) as a pretty JSON array.
pub fn write_products(path: &Path, records: &[ProductRecord]) -> Result<()> {
    write_json(path, &records)
}

pub fn read_spec(path: &Path) -> Result<LayoutSpec> {
    read_json(path)
}

/// Writes one `<slug>.json` per spec into `dir`, returning the written paths in input order.
pub fn write_specs<'a>(
    dir: &Path,
    specs: impl IntoIterator<Item = &'a LayoutSpec>,
) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::new();
    for spec in specs {
        if spec.slug.is_empty() {
            return Err(StoreError::EmptySlug {
                dir: dir.to_path_buf(),
                label: spec.title().to_string(),
            });
        }
        let path = dir.join(format!("{}.json", spec.slug));
        write_json(&path, spec)?;
        written.push(path);
    }
    Ok(written)
}

/// Lists the `*.json` files directly inside `dir`, sorted by file name.
pub fn spec_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Loads every spec in `dir`.
///
/// Listing the directory must succeed; each file then carries its own result so one
/// unreadable spec does not hide the others.
pub fn read_spec_dir(dir: &Path) -> Result<Vec<(PathBuf, Result<LayoutSpec>)>> {
    Ok(spec_files(dir)?
        .into_iter()
        .map(|path| {
            let spec = read_spec(&path);
            (path, spec)
        })
        .collect())
}

pub fn write_svg(dir: &Path, slug: &str, svg: &str) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{slug}.svg"));
    fs::write(&path, svg).map_err(io_err(&path))?;
    tracing::debug!(path = %path.display(), "wrote svg");
    Ok(path)
}
