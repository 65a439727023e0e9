//! Error types for contour map rendering.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Primary error type for the contour pipeline and its I/O wrappers.
///
/// Numeric edge cases (near-zero interpolation denominators, a collapsed
/// color gradient) and an empty level set never show up here: they are
/// absorbed where they occur and the render still completes.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Input Errors ===
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    // === Render Errors ===
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContourError {
    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a Parse error for a 1-based input line.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Create an Encode error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than
    /// the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ContourError::InvalidGrid(_)
                | ContourError::Parse { .. }
                | ContourError::InvalidConfig(_)
        )
    }
}
