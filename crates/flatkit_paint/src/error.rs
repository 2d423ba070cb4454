//! Paint error types

use thiserror::Error;

/// Paint-related errors
#[derive(Error, Debug)]
pub enum PaintError {
    /// Canvas or target size with a zero dimension
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Failed to encode or write an image
    #[error("failed to save image: {0}")]
    Save(#[from] ::image::ImageError),
}

/// Result type for paint operations
pub type Result<T> = std::result::Result<T, PaintError>;
