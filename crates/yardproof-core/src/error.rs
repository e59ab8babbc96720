pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A layout spec was requested for a record that never passed the extraction filter.
    #[error("product {id} ({name}) has no {field}; cannot build a layout spec")]
    MissingDimensions {
        id: u32,
        name: String,
        field: &'static str,
    },

    /// The cleaned product name has no characters a slug can keep (`!!!`).
    #[error("product {id} ({name}) has no usable characters for a slug")]
    EmptySlug { id: u32, name: String },

    #[error("invalid config value for `{key}`: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
