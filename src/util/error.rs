//! Error types for nccmatch.

use thiserror::Error;

/// Errors surfaced by nccmatch operations.
///
/// Degenerate inputs (flat templates, zero-variance windows) are never
/// errors: they score zero and fall out of the result set instead.
#[derive(Debug, Error, PartialEq)]
pub enum NccMatchError {
    /// An image dimension is zero or the product overflows.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A pixel buffer length disagrees with the declared dimensions.
    #[error("buffer length {got} does not match expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// The row stride is smaller than the image width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// A rectangle query leaves the image bounds.
    #[error(
        "region {width}x{height} at ({x}, {y}) exceeds image bounds {img_width}x{img_height}"
    )]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Thread-pool configuration was requested after the pool was created.
    #[error("thread pool already initialized; configure_threads must run before the first search")]
    ThreadPoolAlreadyInitialized,
    /// The global thread pool could not be built.
    #[error("thread pool build failed: {reason}")]
    ThreadPool { reason: String },
    /// An image file could not be opened or read.
    #[cfg(feature = "image-io")]
    #[error("failed to read image: {reason}")]
    ImageIo { reason: String },
    /// Encoded image bytes could not be decoded.
    #[cfg(feature = "image-io")]
    #[error("failed to decode image: {reason}")]
    ImageDecode { reason: String },
}

/// Result alias for nccmatch operations.
pub type NccMatchResult<T> = std::result::Result<T, NccMatchError>;
