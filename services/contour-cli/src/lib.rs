//! Contour map command-line renderer.
//!
//! Reads a step-prefixed CSV grid, renders a banded contour map and writes
//! it as a PNG or JPEG image.

pub mod config;
pub mod run;

pub use config::{LogFormat, RenderSettings, SettingsOverrides};
pub use run::{exit_code, run, RunSummary};
