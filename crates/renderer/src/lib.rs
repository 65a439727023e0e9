//! Contour map rendering for gridded scalar data.
//!
//! Pipeline stages:
//! - Bilinear grid resampling
//! - Contour level generation
//! - Banded fill colors
//! - Contour lines (marching squares)
//! - Raster compositing and PNG/JPEG encoding

pub mod colormap;
pub mod contour;
pub mod encode;
pub mod png;
pub mod raster;
pub mod render;
pub mod resample;

pub use colormap::{color_for, BandPalette, Rgb};
pub use contour::{generate_contour_levels, march_squares, march_squares_all, CellCase, Segment};
pub use encode::{encode_raster, OutputFormat};
pub use raster::Raster;
pub use render::{render, render_contour_map, RenderConfig, RenderedMap};
pub use resample::resample;
