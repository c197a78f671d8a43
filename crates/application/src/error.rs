use filter_preview_domain::{DomainError, ParameterKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("asset not found: {0}")]
    AssetNotFound(String),
    #[error("could not decode asset {name}: {reason}")]
    AssetDecode { name: String, reason: String },
    #[error("io error: {0}")]
    Io(String),
    #[error("no source image loaded")]
    MissingSource,
    #[error("filter {0} is not supported by the engine")]
    UnsupportedFilter(String),
    #[error("filter {filter} rejected {key:?}={value}: {reason}")]
    InvalidParameter {
        filter: String,
        key: ParameterKey,
        value: f32,
        reason: String,
    },
    #[error("filter {0} produced no output image")]
    EmptyOutput(String),
    #[error("could not rasterize filter output: {0}")]
    Rasterize(String),
}
