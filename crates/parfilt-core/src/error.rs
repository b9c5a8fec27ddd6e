//! Error types for parfilt-core operations.
//!
//! Covers the failure modes of buffer construction and sample access:
//! bad dimensions, data length not matching the declared shape, and
//! out-of-range coordinates on the checked accessors.
//!
//! Filtering-level errors (unknown filter names, kernel/image size
//! conflicts) live in `parfilt-filters`; device errors in
//! `parfilt-compute`. Both convert from this type with `#[from]`.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or accessing pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width, height, or channel count is unusable.
    ///
    /// Returned when a dimension is zero or the total sample count would
    /// overflow `usize`.
    #[error("invalid dimensions: {width}x{height}x{channels} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested channel count
        channels: u32,
        /// Reason why the dimensions are invalid
        reason: String,
    },

    /// Sample data length does not equal `width * height * channels`.
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch {
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        actual: usize,
    },

    /// Sample coordinates are outside the buffer bounds.
    #[error("sample ({x}, {y}, {channel}) out of bounds for buffer {width}x{height}x{channels}")]
    OutOfBounds {
        /// X coordinate that was accessed
        x: u32,
        /// Y coordinate that was accessed
        y: u32,
        /// Channel index that was accessed
        channel: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
        /// Buffer channel count
        channels: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        width: u32,
        height: u32,
        channels: u32,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            channels,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferSizeMismatch`] error.
    #[inline]
    pub fn buffer_size_mismatch(expected: usize, actual: usize) -> Self {
        Self::BufferSizeMismatch { expected, actual }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = Error::invalid_dimensions(0, 64, 3, "width must be non-zero");
        let msg = err.to_string();
        assert!(msg.contains("0x64x3"));
        assert!(msg.contains("width must be non-zero"));
    }

    #[test]
    fn test_buffer_size_mismatch_message() {
        let err = Error::buffer_size_mismatch(48, 47);
        assert!(err.to_string().contains("48"));
        assert!(err.to_string().contains("47"));
    }

    #[test]
    fn test_out_of_bounds_predicate() {
        let err = Error::OutOfBounds {
            x: 10,
            y: 2,
            channel: 0,
            width: 8,
            height: 8,
            channels: 3,
        };
        assert!(err.is_bounds_error());
        assert!(!Error::buffer_size_mismatch(1, 2).is_bounds_error());
    }
}
