//! Banded color scale for contour map fills.
//!
//! Values at or below zero are drawn as water, values in the first step
//! band as lowland green, and everything above fades from yellow to red as
//! it approaches the grid maximum.

/// Color value in RGB format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as a byte array.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Fill for samples at or below zero (light blue).
pub const BELOW_BASELINE: Rgb = Rgb::new(173, 216, 230);

/// Fill for samples in `(0, step)` (green).
pub const LOW_BAND: Rgb = Rgb::new(0, 255, 0);

/// Stroke color for contour lines (black).
pub const CONTOUR_LINE: Rgb = Rgb::new(0, 0, 0);

/// Map a sample to its fill color.
///
/// # Arguments
/// - `value`: The sample
/// - `step`: Contour step; upper bound of the low band
/// - `max`: Largest sample of the grid; top of the gradient
pub fn color_for(value: f32, step: f32, max: f32) -> Rgb {
    if value <= 0.0 {
        return BELOW_BASELINE;
    }

    if value < step {
        return LOW_BAND;
    }

    let t = gradient_position(value, step, max);
    Rgb::new(255, (255.0 * (1.0 - t)) as u8, 0)
}

/// Position of `value` within the `[step, max]` gradient, in `[0, 1]`.
///
/// A collapsed (or inverted) gradient puts every value at the top.
fn gradient_position(value: f32, step: f32, max: f32) -> f32 {
    let range = max - step;
    if range <= 0.0 {
        return 1.0;
    }
    ((value - step) / range).clamp(0.0, 1.0)
}

/// Color scale parameters for one render, fixed from the source grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPalette {
    /// Contour step
    pub step: f32,
    /// Maximum sample of the source grid
    pub max: f32,
}

impl BandPalette {
    pub fn new(step: f32, max: f32) -> Self {
        Self { step, max }
    }

    /// Fill color for a sample.
    #[inline]
    pub fn color(&self, value: f32) -> Rgb {
        color_for(value, self.step, self.max)
    }
}
