mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{AssetProvider, Filter, FilterEngine, FilterOutput};
pub use service::{DisplayMode, FilterControl, PreviewScreen};
pub use use_cases::{
    ApplyFilterCommand, DisplayedImageQuery, FilterControlsQuery, LoadSourceImageCommand,
    ResetImageCommand, SelectFilterCommand,
};
