//! Synthetic grid generators for contour tests and benchmarks.
//!
//! Each generator is deterministic, so tests can assert on exact
//! segment counts and pixel colors.

use contour_common::Grid;

/// Build a grid by evaluating `f(col, row)` at every position.
///
/// Panics if `cols` or `rows` is zero.
pub fn grid_from_fn(cols: usize, rows: usize, f: impl Fn(usize, usize) -> f32) -> Grid {
    let mut data = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            data.push(f(col, row));
        }
    }
    Grid::new(cols, rows, data).expect("generator produced an invalid grid")
}

/// A grid where every sample is `value`.
pub fn uniform_grid(cols: usize, rows: usize, value: f32) -> Grid {
    grid_from_fn(cols, rows, |_, _| value)
}

/// Linear ramp left to right: column `c` has value `c * step`.
pub fn ramp_grid(cols: usize, rows: usize, step: f32) -> Grid {
    grid_from_fn(cols, rows, |col, _| col as f32 * step)
}

/// Single cone-shaped peak of height `peak` in the grid center, falling
/// to zero at the corners.
pub fn peak_grid(cols: usize, rows: usize, peak: f32) -> Grid {
    let cx = (cols as f32 - 1.0) / 2.0;
    let cy = (rows as f32 - 1.0) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(f32::EPSILON);

    grid_from_fn(cols, rows, |col, row| {
        let dx = col as f32 - cx;
        let dy = row as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        peak * (1.0 - dist / max_dist)
    })
}

/// Elevation-like field: rolling hills with a coastline dipping below zero.
///
/// Values span roughly -20 to 100.
pub fn terrain_grid(cols: usize, rows: usize) -> Grid {
    grid_from_fn(cols, rows, |col, row| {
        let fx = col as f32 / cols.max(1) as f32;
        let fy = row as f32 / rows.max(1) as f32;

        let v1 = (fx * std::f32::consts::PI * 3.0).sin() * 25.0;
        let v2 = (fy * std::f32::consts::PI * 2.0).cos() * 20.0;
        let v3 = ((fx + fy) * std::f32::consts::PI * 1.5).sin() * 15.0;

        40.0 + v1 + v2 + v3 - fx * 30.0
    })
}

/// The 2x2 saddle: high on one diagonal, low on the other.
///
/// With `high_on_main_diagonal` the top-left and bottom-right corners are
/// high (case index 5 at a mid level); otherwise top-right and bottom-left
/// (case index 10).
pub fn saddle_grid(high_on_main_diagonal: bool) -> Grid {
    let rows = if high_on_main_diagonal {
        vec![vec![10.0, 0.0], vec![0.0, 10.0]]
    } else {
        vec![vec![0.0, 10.0], vec![10.0, 0.0]]
    };
    Grid::from_rows(rows).expect("saddle grid is rectangular")
}

/// A single 2x2 cell with corners in top-left, top-right, bottom-right,
/// bottom-left order.
pub fn cell_grid(corners: [f32; 4]) -> Grid {
    let [tl, tr, br, bl] = corners;
    Grid::from_rows(vec![vec![tl, tr], vec![bl, br]]).expect("cell grid is rectangular")
}

/// Deterministic pseudo-random field in `[0, amplitude)`.
pub fn noise_grid(cols: usize, rows: usize, amplitude: f32, seed: u32) -> Grid {
    grid_from_fn(cols, rows, |col, row| {
        let hash = simple_hash(col as u32, row as u32, seed);
        (hash % 10_000) as f32 / 10_000.0 * amplitude
    })
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_grid() {
        let grid = ramp_grid(4, 2, 5.0);
        assert_eq!(grid.row(0), &[0.0, 5.0, 10.0, 15.0]);
        assert_eq!(grid.row(1), grid.row(0));
    }

    #[test]
    fn test_peak_grid_center_is_max() {
        let grid = peak_grid(5, 5, 100.0);
        let range = grid.value_range();
        assert_eq!(grid.get(2, 2), range.max);
        assert!(grid.get(0, 0).abs() < 1e-4);
    }

    #[test]
    fn test_cell_grid_corner_order() {
        let grid = cell_grid([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(1, 0), 2.0);
        assert_eq!(grid.get(1, 1), 3.0);
        assert_eq!(grid.get(0, 1), 4.0);
    }

    #[test]
    fn test_noise_grid_deterministic() {
        assert_eq!(noise_grid(8, 8, 10.0, 42), noise_grid(8, 8, 10.0, 42));
        assert_ne!(noise_grid(8, 8, 10.0, 42), noise_grid(8, 8, 10.0, 43));
    }
}
