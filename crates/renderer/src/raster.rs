//! RGB raster output of the render pipeline.

use crate::colormap::Rgb;

/// Bytes per pixel in a [`Raster`].
pub const CHANNELS: usize = 3;

/// An RGB8 image, row-major, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Drop the alpha channel of an opaque tiny-skia pixmap.
    ///
    /// Pixmap data is premultiplied; every pixel the renderer produces is
    /// opaque, so premultiplied and straight color are the same.
    pub(crate) fn from_pixmap(pixmap: &tiny_skia::Pixmap) -> Self {
        let mut pixels = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * CHANNELS);
        for rgba in pixmap.data().chunks_exact(4) {
            pixels.extend_from_slice(&rgba[..CHANNELS]);
        }
        Self {
            width: pixmap.width() as usize,
            height: pixmap.height() as usize,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at column `x`, row `y`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * CHANNELS;
        Some(Rgb::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ))
    }

    /// Number of pixels with exactly this color.
    pub fn count_color(&self, color: Rgb) -> usize {
        let target = color.to_array();
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|px| **px == target[..])
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_pixmap(width: u32, height: u32, color: Rgb) -> tiny_skia::Pixmap {
        let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
        pixmap
    }

    #[test]
    fn test_from_pixmap_drops_alpha() {
        let raster = Raster::from_pixmap(&solid_pixmap(3, 2, Rgb::new(1, 2, 3)));
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.pixels().len(), 18);
        assert_eq!(raster.pixel(2, 1), Some(Rgb::new(1, 2, 3)));
        assert_eq!(raster.count_color(Rgb::new(1, 2, 3)), 6);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let raster = Raster::from_pixmap(&solid_pixmap(1, 1, Rgb::new(0, 0, 0)));
        assert_eq!(raster.pixel(1, 0), None);
        assert_eq!(raster.pixel(0, 1), None);
    }
}
