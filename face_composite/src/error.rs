use crate::core_modules::features::Category;
use thiserror::Error;

/// Everything that can go wrong around a composite.
///
/// Rendering itself never fails: unknown variants fall back and missing keys
/// skip. These errors come from the edges (parsing input, encoding output,
/// loading configuration, reaching the batch pool).
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("feature `{category}` must be a string, found {found}")]
    MalformedValue { category: Category, found: &'static str },

    #[error("feature set must be a JSON object")]
    NotAnObject,

    #[error("invalid feature JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode composite: {0}")]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid compositor configuration: {0}")]
    Config(String),

    #[error("failed to parse compositor configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("batch renderer is no longer accepting work")]
    WorkerUnavailable,
}
