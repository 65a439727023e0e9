//! Render settings loading and types.
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional YAML settings file, then environment variables and flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use renderer::encode::{OutputFormat, DEFAULT_JPEG_QUALITY};
use renderer::RenderConfig;
use serde::Deserialize;

/// Output path used when none is configured.
pub const DEFAULT_OUTPUT: &str = "contour_lines.png";

/// Settings for one render, as read from a YAML file.
///
/// ```yaml
/// input: dataset/elevation.csv
/// output: out/elevation.png
/// width: 600
/// height: 600
/// scale: 10
/// stroke_width: 1.5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Input CSV grid.
    pub input: Option<PathBuf>,

    /// Output image path.
    pub output: PathBuf,

    /// Output width in pixels; native grid width when unset.
    pub width: Option<usize>,

    /// Output height in pixels; native grid height when unset.
    pub height: Option<usize>,

    /// Pixels per grid cell.
    pub scale: usize,

    /// Contour line width in pixels.
    pub stroke_width: f32,

    /// Anti-alias contour lines.
    pub anti_alias: bool,

    /// Image format name (`png`, `jpeg`). Inferred from `output` when unset.
    pub format: Option<String>,

    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: render.output_width,
            height: render.output_height,
            scale: render.scale,
            stroke_width: render.stroke_width,
            anti_alias: render.anti_alias,
            format: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RenderSettings {
    /// Parse settings from YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse settings YAML")
    }

    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;
        let settings = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid settings file: {:?}", path))?;

        tracing::info!(path = ?path, "Loaded settings file");
        Ok(settings)
    }

    /// Apply overrides from the environment or command line.
    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.input = Some(input);
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if overrides.width.is_some() {
            self.width = overrides.width;
        }
        if overrides.height.is_some() {
            self.height = overrides.height;
        }
        if let Some(scale) = overrides.scale {
            self.scale = scale;
        }
        if let Some(stroke_width) = overrides.stroke_width {
            self.stroke_width = stroke_width;
        }
        if let Some(anti_alias) = overrides.anti_alias {
            self.anti_alias = anti_alias;
        }
        if overrides.format.is_some() {
            self.format = overrides.format;
        }
        if let Some(quality) = overrides.jpeg_quality {
            self.jpeg_quality = quality;
        }
        self
    }

    /// The input path, which has no default.
    pub fn input(&self) -> Result<&Path> {
        self.input
            .as_deref()
            .context("No input file given (use --input or set `input` in the settings file)")
    }

    /// Resolve the image format from `format`, or from the output extension.
    pub fn output_format(&self) -> Result<OutputFormat> {
        match &self.format {
            Some(name) => OutputFormat::from_name(name, self.jpeg_quality)
                .with_context(|| format!("Unsupported output format '{}' (expected png or jpeg)", name)),
            None => OutputFormat::from_path(&self.output, self.jpeg_quality).with_context(|| {
                format!(
                    "Cannot infer image format from {:?}; use a .png/.jpg extension or --format",
                    self.output
                )
            }),
        }
    }

    /// Core renderer configuration.
    pub fn into_render_config(self) -> RenderConfig {
        RenderConfig {
            output_width: self.width,
            output_height: self.height,
            scale: self.scale,
            stroke_width: self.stroke_width,
            anti_alias: self.anti_alias,
        }
    }
}

/// Values given on the command line or through the environment.
///
/// `None` leaves the lower layer's value in place.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub scale: Option<usize>,
    pub stroke_width: Option<f32>,
    pub anti_alias: Option<bool>,
    pub format: Option<String>,
    pub jpeg_quality: Option<u8>,
}

/// Log output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}' (expected text or json)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_config() {
        let settings = RenderSettings::default();
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.jpeg_quality, 90);
        assert_eq!(settings.into_render_config(), RenderConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = RenderSettings::from_yaml_str("scale: 4\nanti_alias: true\n").unwrap();
        assert_eq!(settings.scale, 4);
        assert!(settings.anti_alias);
        assert_eq!(settings.stroke_width, 1.0);
        assert_eq!(settings.width, None);
    }

    #[test]
    fn test_yaml_unknown_key_rejected() {
        assert!(RenderSettings::from_yaml_str("scael: 4\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let settings = RenderSettings::from_yaml_str("scale: 4\nwidth: 400\noutput: a.png\n")
            .unwrap()
            .apply(SettingsOverrides {
                scale: Some(8),
                output: Some(PathBuf::from("b.jpg")),
                ..Default::default()
            });

        assert_eq!(settings.scale, 8);
        assert_eq!(settings.width, Some(400));
        assert_eq!(settings.output, PathBuf::from("b.jpg"));
    }

    #[test]
    fn test_output_format_inference() {
        let mut settings = RenderSettings {
            output: PathBuf::from("map.jpeg"),
            jpeg_quality: 70,
            ..Default::default()
        };
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Jpeg { quality: 70 });

        settings.format = Some("png".to_string());
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Png);

        settings.format = Some("tiff".to_string());
        assert!(settings.output_format().is_err());
    }

    #[test]
    fn test_output_format_unknown_extension() {
        let settings = RenderSettings {
            output: PathBuf::from("map.bmp"),
            ..Default::default()
        };
        assert!(settings.output_format().is_err());
    }

    #[test]
    fn test_missing_input() {
        assert!(RenderSettings::default().input().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
