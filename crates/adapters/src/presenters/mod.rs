use filter_preview_application::{DisplayMode, FilterControl};
use filter_preview_domain::Bitmap;
use serde::Serialize;

#[derive(Serialize)]
struct ControlView<'a> {
    index: usize,
    id: &'a str,
    label: &'a str,
}

pub fn present_control_row(control: &FilterControl) -> String {
    format!(
        "{}\t{}\t{}",
        control.index,
        control.filter_id.as_str(),
        control.label
    )
}

pub fn present_controls_json(controls: &[FilterControl]) -> serde_json::Result<String> {
    let views: Vec<ControlView<'_>> = controls
        .iter()
        .map(|control| ControlView {
            index: control.index,
            id: control.filter_id.as_str(),
            label: &control.label,
        })
        .collect();
    serde_json::to_string_pretty(&views)
}

pub fn present_display_state(mode: &DisplayMode, displayed: Option<&Bitmap>) -> String {
    let Some(bitmap) = displayed else {
        return "nothing displayed".to_string();
    };
    let subject = match mode {
        DisplayMode::Filtered(filter_id) => format!("filter {filter_id}"),
        DisplayMode::Original | DisplayMode::Empty => "original".to_string(),
    };
    format!(
        "showing {} ({}x{})",
        subject,
        bitmap.width(),
        bitmap.height()
    )
}
