//! Raster encoding to image file formats.

use std::path::Path;

use contour_common::{ContourError, ContourResult};
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

use crate::png;
use crate::raster::Raster;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG, indexed when the raster has few enough colors.
    Png,
    /// Lossy JPEG at the given quality (1-100).
    Jpeg { quality: u8 },
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl OutputFormat {
    /// Parse a format name (`png`, `jpg`, `jpeg`; case-insensitive).
    pub fn from_name(name: &str, jpeg_quality: u8) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg {
                quality: jpeg_quality,
            }),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path, jpeg_quality: u8) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_name(ext, jpeg_quality))
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }
}

/// Encode a raster into the bytes of an image file.
pub fn encode_raster(raster: &Raster, format: OutputFormat) -> ContourResult<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Png => png::create_png_auto(raster.pixels(), raster.width(), raster.height())?,
        OutputFormat::Jpeg { quality } => encode_jpeg(raster, quality)?,
    };

    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        format = format.extension(),
        size = bytes.len(),
        "Encoded raster"
    );

    Ok(bytes)
}

fn encode_jpeg(raster: &Raster, quality: u8) -> ContourResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(ContourError::encode(format!(
            "JPEG quality must be 1-100, got {}",
            quality
        )));
    }

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(
            raster.pixels(),
            raster.width() as u32,
            raster.height() as u32,
            ColorType::Rgb8,
        )
        .map_err(|e| ContourError::encode(format!("JPEG encoding failed: {}", e)))?;

    Ok(out)
}
