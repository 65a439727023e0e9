//! The render command: read the grid, render, encode, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use contour_common::ContourError;
use csv_grid_parser::read_grid_csv;
use renderer::{encode_raster, render_contour_map};
use tracing::info;

use crate::config::RenderSettings;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub levels: usize,
    pub segments: usize,
    pub bytes: usize,
}

/// Render the configured input to the configured output file.
pub fn run(settings: RenderSettings) -> Result<RunSummary> {
    let start = Instant::now();
    let input = settings.input()?.to_path_buf();
    let output = settings.output.clone();
    let format = settings.output_format()?;

    let parsed =
        read_grid_csv(&input).with_context(|| format!("Failed to load grid from {:?}", input))?;
    info!(
        path = ?input,
        cols = parsed.grid.cols(),
        rows = parsed.grid.rows(),
        step = parsed.step,
        "Loaded grid"
    );

    let config = settings.into_render_config();
    let map = render_contour_map(&parsed.grid, parsed.step, &config)
        .context("Failed to render contour map")?;
    let image = encode_raster(&map.raster, format).context("Failed to encode image")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    std::fs::write(&output, &image).with_context(|| format!("Failed to write {:?}", output))?;

    let summary = RunSummary {
        output,
        width: map.raster.width(),
        height: map.raster.height(),
        levels: map.levels.len(),
        segments: map.segment_count,
        bytes: image.len(),
    };

    info!(
        path = ?summary.output,
        format = format.extension(),
        width = summary.width,
        height = summary.height,
        levels = summary.levels,
        segments = summary.segments,
        bytes = summary.bytes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Wrote contour map"
    );

    Ok(summary)
}

/// Process exit code for a failed run.
///
/// Bad input data or settings exit with 2, everything else with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let input_error = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ContourError>())
        .any(ContourError::is_input_error);

    if input_error {
        2
    } else {
        1
    }
}
