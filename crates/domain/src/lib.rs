mod bitmap;
mod error;
mod filter;
mod parameters;

pub use bitmap::Bitmap;
pub use error::DomainError;
pub use filter::{builtin, CatalogEntry, FilterCatalog, FilterId};
pub use parameters::{tuned_parameters, ParameterKey, ParameterSetting, DEFAULT_INTENSITY};
