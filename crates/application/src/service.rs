use filter_preview_domain::{tuned_parameters, Bitmap, FilterCatalog, FilterId};
use tracing::{debug, error, info, warn};

use crate::{
    ApplicationError, ApplyFilterCommand, AssetProvider, DisplayedImageQuery, FilterControlsQuery,
    FilterEngine, LoadSourceImageCommand, ResetImageCommand, SelectFilterCommand,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    Empty,
    Original,
    Filtered(FilterId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub index: usize,
    pub filter_id: FilterId,
    pub label: String,
}

/// State and behaviour of the single preview screen.
///
/// Every filter renders from the source image. Failures are logged and leave
/// the displayed image as it was.
pub struct PreviewScreen {
    engine: Box<dyn FilterEngine>,
    assets: Box<dyn AssetProvider>,
    catalog: FilterCatalog,
    source: Option<Bitmap>,
    displayed: Option<Bitmap>,
    selected_index: Option<usize>,
    mode: DisplayMode,
}

impl PreviewScreen {
    pub fn new(
        engine: Box<dyn FilterEngine>,
        assets: Box<dyn AssetProvider>,
        catalog: FilterCatalog,
    ) -> Self {
        Self {
            engine,
            assets,
            catalog,
            source: None,
            displayed: None,
            selected_index: None,
            mode: DisplayMode::Empty,
        }
    }

    pub fn load_source_image(&mut self, command: LoadSourceImageCommand) {
        match self.assets.load_bitmap(&command.asset_name) {
            Ok(bitmap) => {
                info!(
                    asset = %command.asset_name,
                    width = bitmap.width(),
                    height = bitmap.height(),
                    "loaded source image"
                );
                self.displayed = Some(bitmap.clone());
                self.source = Some(bitmap);
                self.mode = DisplayMode::Original;
            }
            Err(error) => {
                error!(asset = %command.asset_name, %error, "could not load source image");
            }
        }
    }

    pub fn filter_controls(&self, _query: FilterControlsQuery) -> Vec<FilterControl> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(index, entry)| FilterControl {
                index,
                filter_id: entry.id.clone(),
                label: entry.label.clone(),
            })
            .collect()
    }

    pub fn select_filter(&mut self, command: SelectFilterCommand) {
        let Some(entry) = self.catalog.entry(command.index) else {
            debug!(
                index = command.index,
                catalog_len = self.catalog.len(),
                "ignoring selection outside the catalog"
            );
            return;
        };

        let filter_id = entry.id.clone();
        self.selected_index = Some(command.index);
        self.apply_filter(ApplyFilterCommand::new(filter_id));
    }

    pub fn apply_filter(&mut self, command: ApplyFilterCommand) {
        match self.render(&command) {
            Ok(bitmap) => {
                debug!(
                    filter = %command.filter_id,
                    intensity = command.intensity,
                    "filter applied"
                );
                self.displayed = Some(bitmap);
                self.mode = DisplayMode::Filtered(command.filter_id);
            }
            Err(error) => {
                warn!(filter = %command.filter_id, %error, "filter not applied");
            }
        }
    }

    pub fn reset_image(&mut self, _command: ResetImageCommand) {
        let Some(source) = &self.source else {
            debug!("reset requested before a source image was loaded");
            return;
        };
        self.displayed = Some(source.clone());
        self.mode = DisplayMode::Original;
    }

    pub fn displayed_image(&self, _query: DisplayedImageQuery) -> Option<&Bitmap> {
        self.displayed.as_ref()
    }

    pub fn source_image(&self) -> Option<&Bitmap> {
        self.source.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn display_mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    fn render(&self, command: &ApplyFilterCommand) -> Result<Bitmap, ApplicationError> {
        let source = self.source.as_ref().ok_or(ApplicationError::MissingSource)?;
        let filter_name = command.filter_id.as_str();

        let mut filter = self
            .engine
            .create_filter(filter_name)
            .ok_or_else(|| ApplicationError::UnsupportedFilter(filter_name.to_string()))?;
        filter.set_input(source)?;
        for setting in tuned_parameters(&command.filter_id, command.intensity) {
            filter.set_parameter(setting.key, setting.value)?;
        }

        let output = filter
            .output_image()
            .ok_or_else(|| ApplicationError::EmptyOutput(filter_name.to_string()))?;
        self.engine.rasterize(&output)
    }
}
