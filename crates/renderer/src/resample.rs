//! Bilinear grid resampling.

use std::borrow::Cow;

use contour_common::{ContourError, ContourResult, Grid};

/// Resample a grid to `dst_cols x dst_rows` using bilinear interpolation.
///
/// Target positions are spread evenly over the source so the first and last
/// target samples land exactly on the source corners. A target dimension of
/// one maps to source coordinate 0 on that axis, which replicates the first
/// source row or column. Neighbours are clamped at the high edge.
///
/// # Arguments
/// - `grid`: Source grid
/// - `dst_cols`: Destination column count
/// - `dst_rows`: Destination row count
///
/// # Returns
/// The source grid itself when the size already matches, otherwise a new grid.
pub fn resample(grid: &Grid, dst_cols: usize, dst_rows: usize) -> ContourResult<Cow<'_, Grid>> {
    if dst_cols == 0 || dst_rows == 0 {
        return Err(ContourError::invalid_grid(format!(
            "cannot resample to {}x{}",
            dst_cols, dst_rows
        )));
    }

    let src_cols = grid.cols();
    let src_rows = grid.rows();

    if src_cols == dst_cols && src_rows == dst_rows {
        // No resampling needed
        return Ok(Cow::Borrowed(grid));
    }

    let len = dst_cols.checked_mul(dst_rows).ok_or_else(|| {
        ContourError::invalid_config(format!(
            "cannot resample to {}x{}: too many samples",
            dst_cols, dst_rows
        ))
    })?;
    let mut output = Vec::with_capacity(len);

    for y in 0..dst_rows {
        let src_y = source_coord(y, src_rows, dst_rows);
        let y1 = src_y.floor() as usize;
        let y2 = (y1 + 1).min(src_rows - 1);
        let dy = src_y - y1 as f32;

        for x in 0..dst_cols {
            let src_x = source_coord(x, src_cols, dst_cols);
            let x1 = src_x.floor() as usize;
            let x2 = (x1 + 1).min(src_cols - 1);
            let dx = src_x - x1 as f32;

            // Get the four surrounding values
            let v11 = grid.get(x1, y1);
            let v21 = grid.get(x2, y1);
            let v12 = grid.get(x1, y2);
            let v22 = grid.get(x2, y2);

            // Interpolate
            let top = v11 * (1.0 - dx) + v21 * dx;
            let bottom = v12 * (1.0 - dx) + v22 * dx;
            output.push(top * (1.0 - dy) + bottom * dy);
        }
    }

    tracing::debug!(
        src_cols,
        src_rows,
        dst_cols,
        dst_rows,
        "Resampled grid"
    );

    Grid::new(dst_cols, dst_rows, output).map(Cow::Owned)
}

/// Fractional source index for destination index `i` along one axis.
///
/// A single destination sample has no spacing, so it sits at source index 0.
#[inline]
fn source_coord(i: usize, src_len: usize, dst_len: usize) -> f32 {
    if dst_len <= 1 {
        0.0
    } else {
        (i as f32 / (dst_len - 1) as f32) * (src_len - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_coord_single_target() {
        assert_eq!(source_coord(0, 10, 1), 0.0);
        assert_eq!(source_coord(4, 1, 5), 0.0);
        assert_eq!(source_coord(1, 3, 5), 0.5);
        assert_eq!(source_coord(4, 3, 5), 2.0);
    }

    #[test]
    fn test_identity_is_borrowed() {
        let grid = Grid::filled(3, 2, 1.0).unwrap();
        let out = resample(&grid, 3, 2).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_midpoint_upsample() {
        let grid = Grid::from_rows(vec![vec![0.0, 10.0]]).unwrap();
        let out = resample(&grid, 3, 1).unwrap();
        assert_eq!(out.row(0), &[0.0, 5.0, 10.0]);
    }
}
