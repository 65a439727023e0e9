//! Rectangular grids of scalar samples.

use crate::error::{ContourError, ContourResult};

/// A rectangular grid of `f32` samples stored in row-major order.
///
/// Construction validates the shape: at least one row and one column,
/// every row the same length, every sample finite. A `Grid` is never
/// mutated afterwards; operations that change it (resampling) build a
/// new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    data: Vec<f32>,
}

/// Minimum and maximum sample of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl Grid {
    /// Create a grid from row-major data.
    pub fn new(cols: usize, rows: usize, data: Vec<f32>) -> ContourResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(ContourError::invalid_grid(format!(
                "grid must have at least one row and column, got {}x{}",
                cols, rows
            )));
        }

        let expected = sample_count(cols, rows)?;
        if data.len() != expected {
            return Err(ContourError::invalid_grid(format!(
                "expected {} samples for a {}x{} grid, got {}",
                expected,
                cols,
                rows,
                data.len()
            )));
        }

        if let Some(idx) = data.iter().position(|v| !v.is_finite()) {
            return Err(ContourError::invalid_grid(format!(
                "non-finite sample {} at row {}, column {}",
                data[idx],
                idx / cols,
                idx % cols
            )));
        }

        Ok(Self { cols, rows, data })
    }

    /// Create a grid from a list of rows, which must all have equal length.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> ContourResult<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ContourError::invalid_grid(format!(
                "row {} has {} columns, expected {}",
                y,
                row.len(),
                cols
            )));
        }

        let height = rows.len();
        let data = rows.into_iter().flatten().collect();
        Self::new(cols, height, data)
    }

    /// Create a grid where every sample is `value`.
    pub fn filled(cols: usize, rows: usize, value: f32) -> ContourResult<Self> {
        let len = sample_count(cols, rows)?;
        Self::new(cols, rows, vec![value; len])
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed grid; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at column `x`, row `y`.
    ///
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.cols + x]
    }

    /// One row of samples.
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Raw row-major samples.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Minimum and maximum sample.
    pub fn value_range(&self) -> ValueRange {
        let (min, max) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        ValueRange { min, max }
    }

    /// Number of 2x2 cells (`(cols-1) * (rows-1)`).
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_sub(1) * self.rows.saturating_sub(1)
    }
}

fn sample_count(cols: usize, rows: usize) -> ContourResult<usize> {
    cols.checked_mul(rows).ok_or_else(|| {
        ContourError::invalid_grid(format!("grid of {}x{} samples is too large", cols, rows))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Grid::new(3, 2, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, ContourError::InvalidGrid(_)));
    }

    #[test]
    fn test_row_access() {
        let grid = Grid::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(grid.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(grid.get(2, 0), 3.0);
    }

    #[test]
    fn test_new_rejects_overflowing_size() {
        let err = Grid::new(usize::MAX, 2, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, ContourError::InvalidGrid(_)));
        assert!(Grid::filled(usize::MAX, 3, 1.0).is_err());
    }

    #[test]
    fn test_cell_count_single_row() {
        let grid = Grid::new(4, 1, vec![0.0; 4]).unwrap();
        assert_eq!(grid.cell_count(), 0);
    }
}
