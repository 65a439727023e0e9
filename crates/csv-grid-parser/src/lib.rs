//! Parser for step-prefixed CSV grids.
//!
//! Input layout:
//!
//! ```text
//! 0.5            <- contour step
//! 1.0,2.0,3.0    <- row 0
//! 4.0,5.0,6.0    <- row 1
//! ```
//!
//! Blank lines are skipped and whitespace around values is ignored. Trailing
//! commas at the end of a row are dropped, so `1,2,3,` is the row `1,2,3`.
//! Every data row must have the same number of values.

use std::path::Path;

use contour_common::{ContourError, ContourResult, Grid};

/// A parsed input file: contour step plus sample grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFile {
    pub step: f32,
    pub grid: Grid,
}

/// Parse CSV text into a step and a grid.
pub fn parse_grid_csv(text: &str) -> ContourResult<GridFile> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (step_line, step_text) = lines
        .next()
        .ok_or_else(|| ContourError::parse(1, "input is empty"))?;

    let step = step_text.parse::<f32>().map_err(|e| {
        ContourError::parse(step_line, format!("invalid step '{}': {}", step_text, e))
    })?;

    let mut cols: Option<usize> = None;
    let mut rows = 0usize;
    let mut data = Vec::new();

    for (line_no, line) in lines {
        let start = data.len();
        let line = line.trim_end_matches(|c: char| c == ',' || c.is_whitespace());

        for (col, token) in line.split(',').enumerate() {
            let token = token.trim();
            let value = token.parse::<f32>().map_err(|e| {
                ContourError::parse(
                    line_no,
                    format!("invalid value '{}' in column {}: {}", token, col + 1, e),
                )
            })?;
            data.push(value);
        }

        let width = data.len() - start;
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(ContourError::parse(
                    line_no,
                    format!("row has {} values, expected {}", width, expected),
                ));
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.ok_or_else(|| ContourError::invalid_grid("input has no data rows"))?;
    let grid = Grid::new(cols, rows, data)?;

    let range = grid.value_range();
    tracing::debug!(
        cols,
        rows,
        step,
        min = range.min,
        max = range.max,
        "Parsed CSV grid"
    );

    Ok(GridFile { step, grid })
}

/// Read and parse a CSV grid file.
pub fn read_grid_csv(path: impl AsRef<Path>) -> ContourResult<GridFile> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Read CSV input");
    parse_grid_csv(&text)
}
