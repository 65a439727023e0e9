//! Contour map rendering: banded fill plus isolines.
//!
//! The fill pass paints every grid cell as a `scale x scale` block in its
//! band color. The line pass then strokes the marching squares segments of
//! every level, lowest level first, so lines always sit on top of the fill.

use std::time::Instant;

use contour_common::{ContourError, ContourResult, Grid};
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::colormap::{BandPalette, CONTOUR_LINE};
use crate::contour::{generate_contour_levels, march_squares_all};
use crate::raster::Raster;
use crate::resample::resample;

/// Render settings. Built once and passed into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Requested output width in pixels. The grid is resampled to
    /// `width / scale` columns. `None` keeps the native column count.
    pub output_width: Option<usize>,
    /// Requested output height in pixels, as for `output_width`.
    pub output_height: Option<usize>,
    /// Pixels per grid cell along each axis
    pub scale: usize,
    /// Contour line width in pixels
    pub stroke_width: f32,
    /// Anti-alias contour lines (off keeps the palette small)
    pub anti_alias: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_width: None,
            output_height: None,
            scale: 10,
            stroke_width: 1.0,
            anti_alias: false,
        }
    }
}

impl RenderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> ContourResult<()> {
        if self.scale == 0 {
            return Err(ContourError::invalid_config("scale must be > 0"));
        }

        if !(self.stroke_width > 0.0) || !self.stroke_width.is_finite() {
            return Err(ContourError::invalid_config(format!(
                "stroke width must be a positive number, got {}",
                self.stroke_width
            )));
        }

        for (name, value) in [("width", self.output_width), ("height", self.output_height)] {
            if let Some(pixels) = value {
                if pixels < self.scale {
                    return Err(ContourError::invalid_config(format!(
                        "output {} {} is smaller than one cell of {} pixels",
                        name, pixels, self.scale
                    )));
                }
            }
        }

        Ok(())
    }

    /// Grid size (columns, rows) the source is resampled to before rendering.
    pub fn target_size(&self, grid: &Grid) -> (usize, usize) {
        let cols = self
            .output_width
            .map(|w| w / self.scale)
            .unwrap_or(grid.cols());
        let rows = self
            .output_height
            .map(|h| h / self.scale)
            .unwrap_or(grid.rows());
        (cols, rows)
    }

    /// Pixel size of the canvas for a grid of `cols x rows` samples.
    ///
    /// Fails with `InvalidConfig` when the size overflows or does not fit
    /// an RGBA pixmap.
    pub fn canvas_size(&self, cols: usize, rows: usize) -> ContourResult<(u32, u32)> {
        let too_large = || {
            ContourError::invalid_config(format!(
                "a {}x{} grid at scale {} is too large to render",
                cols, rows, self.scale
            ))
        };

        let width = cols
            .checked_mul(self.scale)
            .and_then(|w| u32::try_from(w).ok())
            .ok_or_else(too_large)?;
        let height = rows
            .checked_mul(self.scale)
            .and_then(|h| u32::try_from(h).ok())
            .ok_or_else(too_large)?;

        // RGBA bytes
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(too_large)?;

        Ok((width, height))
    }
}

/// Result of a full contour map render.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub raster: Raster,
    /// Levels that were drawn, ascending
    pub levels: Vec<f32>,
    /// Total number of stroked segments
    pub segment_count: usize,
}

/// Render a contour map from a source grid and contour step.
///
/// Levels and the color scale come from the source grid's value range;
/// the grid is then resampled to the configured output size and rendered.
/// A step that yields no levels is not an error: the map is drawn with fill
/// only.
pub fn render_contour_map(grid: &Grid, step: f32, config: &RenderConfig) -> ContourResult<RenderedMap> {
    config.validate()?;

    let start = Instant::now();
    let range = grid.value_range();
    let levels = generate_contour_levels(range.min, range.max, step);

    if levels.is_empty() {
        tracing::warn!(
            step,
            min = range.min,
            max = range.max,
            "Degenerate level range, rendering fill only"
        );
    }

    let (cols, rows) = config.target_size(grid);
    config.canvas_size(cols, rows)?;
    let resampled = resample(grid, cols, rows)?;
    let palette = BandPalette::new(step, range.max);

    let (raster, segment_count) = draw(&resampled, &levels, &palette, config)?;

    tracing::debug!(
        src_cols = grid.cols(),
        src_rows = grid.rows(),
        cells = grid.cell_count(),
        cols,
        rows,
        num_levels = levels.len(),
        segment_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered contour map"
    );

    Ok(RenderedMap {
        raster,
        levels,
        segment_count,
    })
}

/// Render a grid with the given levels.
///
/// The raster is `cols * scale` by `rows * scale` pixels. No resampling
/// happens here; `config.output_width` and `config.output_height` are ignored.
pub fn render(
    grid: &Grid,
    levels: &[f32],
    palette: &BandPalette,
    config: &RenderConfig,
) -> ContourResult<Raster> {
    config.validate()?;
    draw(grid, levels, palette, config).map(|(raster, _)| raster)
}

fn draw(
    grid: &Grid,
    levels: &[f32],
    palette: &BandPalette,
    config: &RenderConfig,
) -> ContourResult<(Raster, usize)> {
    let (width, height) = config.canvas_size(grid.cols(), grid.rows())?;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        ContourError::invalid_config(format!("cannot allocate a {}x{} raster", width, height))
    })?;

    fill_cells(&mut pixmap, grid, palette, config.scale);
    let segment_count = stroke_levels(&mut pixmap, grid, levels, config);

    Ok((Raster::from_pixmap(&pixmap), segment_count))
}

/// Paint each grid cell as a solid block.
fn fill_cells(pixmap: &mut Pixmap, grid: &Grid, palette: &BandPalette, scale: usize) {
    let mut paint = Paint::default();
    paint.anti_alias = false;
    let size = scale as f32;

    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let color = palette.color(grid.get(x, y));
            paint.set_color_rgba8(color.r, color.g, color.b, 255);

            if let Some(rect) = Rect::from_xywh(x as f32 * size, y as f32 * size, size, size) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }
}

/// Stroke the contour segments of every level, lowest first.
///
/// Returns the number of segments drawn.
fn stroke_levels(pixmap: &mut Pixmap, grid: &Grid, levels: &[f32], config: &RenderConfig) -> usize {
    let mut paint = Paint::default();
    paint.set_color_rgba8(CONTOUR_LINE.r, CONTOUR_LINE.g, CONTOUR_LINE.b, 255);
    paint.anti_alias = config.anti_alias;

    let stroke = Stroke {
        width: config.stroke_width,
        line_cap: LineCap::Square,
        ..Stroke::default()
    };

    let mut segment_count = 0;

    for level_segments in march_squares_all(grid, levels, config.scale as f32) {
        if level_segments.segments.is_empty() {
            continue;
        }

        let mut pb = PathBuilder::new();
        for segment in &level_segments.segments {
            pb.move_to(segment.start.x, segment.start.y);
            pb.line_to(segment.end.x, segment.end.y);
        }
        segment_count += level_segments.segments.len();

        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    segment_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_scale() {
        let config = RenderConfig {
            scale: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_output_smaller_than_cell() {
        let config = RenderConfig {
            output_width: Some(5),
            scale: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_canvas_size() {
        let config = RenderConfig::default();
        assert_eq!(config.canvas_size(4, 2).unwrap(), (40, 20));
        assert!(config.canvas_size(usize::MAX / 2, 2).is_err());
        assert!(config.canvas_size((u32::MAX as usize).saturating_add(1), 1).is_err());
    }

    #[test]
    fn test_target_size() {
        let grid = Grid::filled(4, 3, 1.0).unwrap();
        let config = RenderConfig {
            output_width: Some(600),
            output_height: Some(605),
            scale: 10,
            ..Default::default()
        };
        assert_eq!(config.target_size(&grid), (60, 60));
        assert_eq!(RenderConfig::default().target_size(&grid), (4, 3));
    }
}
