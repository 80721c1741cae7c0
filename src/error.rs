//! Error types for puzzle construction and rendering

use thiserror::Error;

/// Result type alias for puzzle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a puzzle
#[derive(Error, Debug)]
pub enum Error {
    /// Zero-sized grid or target resolution
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// The cell matrix is not square (or has ragged rows)
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Surfaced from the image decoder
    #[error("Cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Rendering was requested with an unusable configuration
    #[error("Invalid render config: {0}")]
    InvalidRenderConfig(String),

    /// Failed to write the rendered output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
