//! Contour line (isoline) extraction using the marching squares algorithm.
//!
//! Every 2x2 cell of the grid is classified against a level into one of 16
//! [`CellCase`]s. Each case names the cell edges the isoline enters and
//! leaves through; crossing points are linearly interpolated along those
//! edges and scaled into output pixel space. Segments are emitted per cell
//! and are not joined into polylines.

use contour_common::Grid;
use rayon::prelude::*;

/// Added to edge interpolation denominators so flat edges do not divide by zero.
pub const EDGE_EPSILON: f32 = 1e-6;

/// A point in 2D space (pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length in pixels.
    pub fn length(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// All segments extracted for one contour level.
#[derive(Debug, Clone)]
pub struct LevelSegments {
    pub level: f32,
    pub segments: Vec<Segment>,
}

/// Generate contour levels between a grid's minimum and maximum.
///
/// Levels start one `step` above `min` and advance by `step` while they stay
/// strictly below `max`, so neither extreme is ever a level. The running value
/// is accumulated, not recomputed from the index, so long runs drift by the
/// usual floating-point error.
///
/// Returns an empty list for a non-positive step, and stops early if adding
/// `step` no longer changes the running value.
pub fn generate_contour_levels(min_value: f32, max_value: f32, step: f32) -> Vec<f32> {
    if !(step > 0.0) || !step.is_finite() {
        return vec![];
    }

    let mut levels = Vec::new();
    let mut level = min_value + step;

    if level <= min_value {
        return levels;
    }

    while level < max_value {
        levels.push(level);
        let next = level + step;
        if next <= level {
            break;
        }
        level = next;
    }

    levels
}

/// One of the four sides of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellEdge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Marching squares classification of a cell against a level.
///
/// Variant names list the corners whose value is strictly above the level.
/// The discriminant is the classic 4-bit case index: top-left is bit 0,
/// top-right bit 1, bottom-right bit 2, bottom-left bit 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellCase {
    AllBelow = 0,
    TopLeft = 1,
    TopRight = 2,
    TopPair = 3,
    BottomRight = 4,
    /// Saddle: top-left and bottom-right above.
    DiagonalDown = 5,
    RightPair = 6,
    AllButBottomLeft = 7,
    BottomLeft = 8,
    LeftPair = 9,
    /// Saddle: top-right and bottom-left above.
    DiagonalUp = 10,
    AllButBottomRight = 11,
    BottomPair = 12,
    AllButTopRight = 13,
    AllButTopLeft = 14,
    AllAbove = 15,
}

impl CellCase {
    /// Classify a cell from its corners (top-left, top-right, bottom-right,
    /// bottom-left).
    #[inline]
    pub fn classify(corners: [f32; 4], level: f32) -> Self {
        let mut index = 0u8;
        for (bit, &value) in corners.iter().enumerate() {
            if value > level {
                index |= 1 << bit;
            }
        }
        Self::from_index(index)
    }

    /// Case for a 4-bit index. Bits above the low four are ignored.
    pub fn from_index(index: u8) -> Self {
        match index & 0x0F {
            0 => Self::AllBelow,
            1 => Self::TopLeft,
            2 => Self::TopRight,
            3 => Self::TopPair,
            4 => Self::BottomRight,
            5 => Self::DiagonalDown,
            6 => Self::RightPair,
            7 => Self::AllButBottomLeft,
            8 => Self::BottomLeft,
            9 => Self::LeftPair,
            10 => Self::DiagonalUp,
            11 => Self::AllButBottomRight,
            12 => Self::BottomPair,
            13 => Self::AllButTopRight,
            14 => Self::AllButTopLeft,
            _ => Self::AllAbove,
        }
    }

    /// The 4-bit case index.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the two ambiguous diagonal cases.
    pub fn is_saddle(self) -> bool {
        matches!(self, Self::DiagonalDown | Self::DiagonalUp)
    }

    /// Edge pairs joined by a segment, in emission order.
    ///
    /// Complementary cases share their pairs. Saddles always split the same
    /// way regardless of the cell's center value, which can join regions the
    /// true surface keeps apart.
    pub fn edge_pairs(self) -> &'static [(CellEdge, CellEdge)] {
        use CellEdge::{Bottom, Left, Right, Top};

        match self {
            Self::AllBelow | Self::AllAbove => &[],
            Self::TopLeft | Self::AllButTopLeft => &[(Left, Top)],
            Self::TopRight | Self::AllButTopRight => &[(Top, Right)],
            Self::TopPair | Self::BottomPair => &[(Left, Right)],
            Self::BottomRight | Self::AllButBottomRight => &[(Right, Bottom)],
            Self::RightPair | Self::LeftPair => &[(Top, Bottom)],
            Self::AllButBottomLeft | Self::BottomLeft => &[(Left, Bottom)],
            Self::DiagonalDown => &[(Top, Right), (Left, Bottom)],
            Self::DiagonalUp => &[(Top, Left), (Right, Bottom)],
        }
    }
}

/// Corner values of one cell plus its grid position.
#[derive(Debug, Clone, Copy)]
struct Cell {
    x: f32,
    y: f32,
    tl: f32,
    tr: f32,
    br: f32,
    bl: f32,
}

impl Cell {
    #[inline]
    fn at(grid: &Grid, x: usize, y: usize) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
            tl: grid.get(x, y),
            tr: grid.get(x + 1, y),
            br: grid.get(x + 1, y + 1),
            bl: grid.get(x, y + 1),
        }
    }

    #[inline]
    fn corners(&self) -> [f32; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Where the level crosses `edge`, in pixel space.
    fn crossing(&self, edge: CellEdge, level: f32, cell_size: f32) -> Point {
        let (x, y) = (self.x, self.y);
        match edge {
            CellEdge::Top => interpolate_edge(x, y, x + 1.0, y, self.tl, self.tr, level, cell_size),
            CellEdge::Right => {
                interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, self.tr, self.br, level, cell_size)
            }
            CellEdge::Bottom => {
                interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, self.bl, self.br, level, cell_size)
            }
            CellEdge::Left => interpolate_edge(x, y, x, y + 1.0, self.tl, self.bl, level, cell_size),
        }
    }
}

/// Marching squares over the whole grid for a single level.
///
/// # Arguments
/// * `grid` - Source samples
/// * `level` - Contour level to extract
/// * `cell_size` - Pixel size of one grid cell in the output
///
/// # Returns
/// Segments in row-major cell order, 0 to 2 per cell.
pub fn march_squares(grid: &Grid, level: f32, cell_size: f32) -> Vec<Segment> {
    if grid.cols() < 2 || grid.rows() < 2 {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(grid.rows() - 1) {
        for x in 0..(grid.cols() - 1) {
            let cell = Cell::at(grid, x, y);
            let case = CellCase::classify(cell.corners(), level);

            for &(from, to) in case.edge_pairs() {
                segments.push(Segment::new(
                    cell.crossing(from, level, cell_size),
                    cell.crossing(to, level, cell_size),
                ));
            }
        }
    }

    segments
}

/// Run marching squares for every level.
///
/// Levels are processed in parallel; the result keeps the input level order.
pub fn march_squares_all(grid: &Grid, levels: &[f32], cell_size: f32) -> Vec<LevelSegments> {
    let all: Vec<LevelSegments> = levels
        .par_iter()
        .map(|&level| LevelSegments {
            level,
            segments: march_squares(grid, level, cell_size),
        })
        .collect();

    tracing::debug!(
        num_levels = levels.len(),
        total_segments = all.iter().map(|l| l.segments.len()).sum::<usize>(),
        "Extracted contour segments"
    );

    all
}

/// Linearly interpolate the level crossing between two cell corners.
///
/// The parameter is clamped to `[0, 1]` so the point never leaves the edge,
/// and the result is scaled by `cell_size` into pixel space.
#[allow(clippy::too_many_arguments)]
fn interpolate_edge(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    val1: f32,
    val2: f32,
    level: f32,
    cell_size: f32,
) -> Point {
    let denom = val2 - val1 + EDGE_EPSILON;
    let t = if denom == 0.0 {
        0.5
    } else {
        ((level - val1) / denom).clamp(0.0, 1.0)
    };

    Point::new(
        (x1 + t * (x2 - x1)) * cell_size,
        (y1 + t * (y2 - y1)) * cell_size,
    )
}
