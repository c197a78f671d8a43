mod canvas;
mod config;
mod layout;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::AppConfig;
use filter_preview_adapters::{
    present_control_row, present_controls_json, present_display_state, FsAssetProvider,
    ImageCrateEngine,
};
use filter_preview_application::{
    ApplyFilterCommand, DisplayMode, DisplayedImageQuery, FilterControlsQuery,
    LoadSourceImageCommand, PreviewScreen,
};
use filter_preview_domain::{FilterCatalog, FilterId, DEFAULT_INTENSITY};

/// Preview an image through a strip of photo filters.
#[derive(Debug, Parser)]
#[command(name = "filter-preview", version)]
struct Cli {
    /// Directory searched for the source image.
    #[arg(long, global = true, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Asset name (file stem) of the source image.
    #[arg(long, global = true, value_name = "NAME")]
    image: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the preview window (default).
    Ui,
    /// List the filter controls in display order.
    Filters {
        #[arg(long)]
        json: bool,
    },
    /// Apply one filter without a window and report what would be shown.
    Render {
        filter_id: String,
        #[arg(long, default_value_t = DEFAULT_INTENSITY)]
        intensity: f32,
    },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();
    let config = AppConfig::default().with_overrides(cli.assets, cli.image);
    let mut screen = build_preview_screen(&config);

    match run_command(cli.command.unwrap_or(Command::Ui), &mut screen, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_preview_screen(config: &AppConfig) -> PreviewScreen {
    PreviewScreen::new(
        Box::new(ImageCrateEngine::default()),
        Box::new(FsAssetProvider::new(config.assets_dir.clone())),
        FilterCatalog::builtin(),
    )
}

fn load_source(screen: &mut PreviewScreen, config: &AppConfig) {
    screen.load_source_image(LoadSourceImageCommand {
        asset_name: config.source_image.clone(),
    });
}

fn run_command(
    command: Command,
    screen: &mut PreviewScreen,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command {
        Command::Ui => {
            load_source(screen, config);
            ui::launch_window(screen, config).map_err(CommandError::Runtime)
        }
        Command::Filters { json } => {
            let controls = screen.filter_controls(FilterControlsQuery);
            if json {
                let rendered = present_controls_json(&controls)
                    .map_err(|error| CommandError::Runtime(format!("json failed: {error}")))?;
                println!("{rendered}");
                return Ok(());
            }
            for control in &controls {
                println!("{}", present_control_row(control));
            }
            Ok(())
        }
        Command::Render {
            filter_id,
            intensity,
        } => {
            let filter_id = FilterId::new(filter_id)
                .map_err(|error| CommandError::Usage(format!("invalid filter id: {error}")))?;

            load_source(screen, config);
            if screen.source_image().is_none() {
                return Err(CommandError::Runtime(format!(
                    "source image '{}' not found under {}",
                    config.source_image,
                    config.assets_dir.display()
                )));
            }

            screen.apply_filter(ApplyFilterCommand::new(filter_id.clone()).with_intensity(intensity));
            let state = present_display_state(
                screen.display_mode(),
                screen.displayed_image(DisplayedImageQuery),
            );
            println!("{state}");

            if screen.display_mode() != &DisplayMode::Filtered(filter_id.clone()) {
                return Err(CommandError::Runtime(format!(
                    "filter {filter_id} was not applied"
                )));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    use super::*;

    fn config_with_asset(dir: &TempDir) -> AppConfig {
        let img = ImageBuffer::from_pixel(3, 2, Rgba([120_u8, 80, 40, 255]));
        img.save(dir.path().join("image.png")).expect("png should be written");
        AppConfig::default().with_overrides(Some(dir.path().to_path_buf()), None)
    }

    #[test]
    fn defaults_to_ui_without_subcommand() {
        let cli = Cli::try_parse_from(["filter-preview"]).expect("empty args should parse");
        assert!(cli.command.is_none());
        assert!(cli.assets.is_none());
    }

    #[test]
    fn parses_render_with_global_flags() {
        let cli = Cli::try_parse_from([
            "filter-preview",
            "render",
            "sepia-tone",
            "--intensity",
            "0.5",
            "--assets",
            "photos",
        ])
        .expect("render should parse");

        assert_eq!(cli.assets, Some(PathBuf::from("photos")));
        match cli.command {
            Some(Command::Render {
                filter_id,
                intensity,
            }) => {
                assert_eq!(filter_id, "sepia-tone");
                assert_eq!(intensity, 0.5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn render_requires_a_filter_id() {
        assert!(Cli::try_parse_from(["filter-preview", "render"]).is_err());
    }

    #[test]
    fn render_applies_known_filter() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_with_asset(&dir);
        let mut screen = build_preview_screen(&config);

        let result = run_command(
            Command::Render {
                filter_id: "color-invert".to_string(),
                intensity: DEFAULT_INTENSITY,
            },
            &mut screen,
            &config,
        );
        assert!(result.is_ok());
        assert_eq!(
            screen
                .displayed_image(DisplayedImageQuery)
                .and_then(|bitmap| bitmap.pixel(0, 0)),
            Some([135, 175, 215, 255])
        );
    }

    #[test]
    fn render_of_unknown_filter_is_a_runtime_failure() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_with_asset(&dir);
        let mut screen = build_preview_screen(&config);

        let result = run_command(
            Command::Render {
                filter_id: "kaleidoscope".to_string(),
                intensity: DEFAULT_INTENSITY,
            },
            &mut screen,
            &config,
        );
        assert!(matches!(result, Err(CommandError::Runtime(_))));
        assert_eq!(screen.display_mode(), &DisplayMode::Original);
    }

    #[test]
    fn render_rejects_blank_filter_id_as_usage() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_with_asset(&dir);
        let mut screen = build_preview_screen(&config);

        let result = run_command(
            Command::Render {
                filter_id: "  ".to_string(),
                intensity: DEFAULT_INTENSITY,
            },
            &mut screen,
            &config,
        );
        assert!(matches!(result, Err(CommandError::Usage(_))));
    }

    #[test]
    fn render_without_source_fails() {
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("empty")).expect("dir");
        let config =
            AppConfig::default().with_overrides(Some(dir.path().join("empty")), None);
        let mut screen = build_preview_screen(&config);

        let result = run_command(
            Command::Render {
                filter_id: "bloom".to_string(),
                intensity: DEFAULT_INTENSITY,
            },
            &mut screen,
            &config,
        );
        assert!(matches!(result, Err(CommandError::Runtime(_))));
    }
}
