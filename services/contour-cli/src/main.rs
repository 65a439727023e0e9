//! contour-map
//!
//! Renders a contour map image from a CSV grid.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use contour_cli::{exit_code, run, LogFormat, RenderSettings, SettingsOverrides};

/// Contour map renderer
#[derive(Parser, Debug)]
#[command(name = "contour-map")]
#[command(about = "Render a contour map image from a CSV grid")]
struct Args {
    /// Input CSV: contour step on the first line, one row of samples per line
    #[arg(short, long, env = "CONTOUR_INPUT")]
    input: Option<PathBuf>,

    /// Output image (.png or .jpg)
    #[arg(short, long, env = "CONTOUR_OUTPUT")]
    output: Option<PathBuf>,

    /// YAML settings file
    #[arg(short, long, env = "CONTOUR_CONFIG")]
    config: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long, env = "CONTOUR_WIDTH")]
    width: Option<usize>,

    /// Output height in pixels
    #[arg(long, env = "CONTOUR_HEIGHT")]
    height: Option<usize>,

    /// Pixels per grid cell
    #[arg(long, env = "CONTOUR_SCALE")]
    scale: Option<usize>,

    /// Contour line width in pixels
    #[arg(long, env = "CONTOUR_STROKE_WIDTH")]
    stroke_width: Option<f32>,

    /// Anti-alias contour lines
    #[arg(long, env = "CONTOUR_ANTI_ALIAS", num_args = 0..=1, default_missing_value = "true")]
    anti_alias: Option<bool>,

    /// Image format (png, jpeg); inferred from the output extension by default
    #[arg(short, long, env = "CONTOUR_FORMAT")]
    format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(long, env = "CONTOUR_JPEG_QUALITY")]
    jpeg_quality: Option<u8>,

    /// Log level
    #[arg(long, default_value = "info", env = "CONTOUR_LOG_LEVEL")]
    log_level: String,

    /// Log format (text, json)
    #[arg(long, default_value = "text", env = "CONTOUR_LOG_FORMAT")]
    log_format: LogFormat,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            width: self.width,
            height: self.height,
            scale: self.scale,
            stroke_width: self.stroke_width,
            anti_alias: self.anti_alias,
            format: self.format.clone(),
            jpeg_quality: self.jpeg_quality,
        }
    }
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format);

    let settings = match &args.config {
        Some(path) => RenderSettings::load(path),
        None => Ok(RenderSettings::default()),
    };

    let result = settings.and_then(|settings| run(settings.apply(args.overrides())));

    match result {
        Ok(summary) => {
            info!(path = ?summary.output, "Done");
        }
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

fn init_tracing(log_level: &str, format: LogFormat) {
    // RUST_LOG takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
