//! Common types shared across the contour-map crates.

pub mod error;
pub mod grid;

pub use error::{ContourError, ContourResult};
pub use grid::{Grid, ValueRange};
