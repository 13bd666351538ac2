use thiserror::Error;

/// Errors raised while building a [`crate::CatalogIndex`] from source data.
///
/// All variants are construction-time failures; a catalog that builds
/// successfully never fails afterwards.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no categories")]
    Empty,

    #[error("missing required field `{field}` at {location}")]
    MissingField {
        field: &'static str,
        location: String,
    },

    #[error("duplicate category key `{0}`")]
    DuplicateCategory(String),

    #[error("duplicate topic key `{key}` (in `{first}` and `{second}`)")]
    DuplicateTopic {
        key: String,
        first: String,
        second: String,
    },

    #[error("default category `{0}` is not declared")]
    UnknownDefaultCategory(String),

    #[error("unknown difficulty `{value}` for topic `{topic}`")]
    UnknownDifficulty { topic: String, value: String },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
