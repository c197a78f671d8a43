use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("filter id must not be empty")]
    EmptyFilterId,
    #[error("label for filter {0} must not be empty")]
    EmptyLabel(String),
    #[error("filter id {0} appears more than once in the catalog")]
    DuplicateFilterId(String),
    #[error("bitmap of {width}x{height} needs {expected} bytes, got {actual}")]
    BitmapSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("bitmap extent must be non-zero, got {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },
}
