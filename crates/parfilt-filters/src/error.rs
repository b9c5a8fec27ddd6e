//! Error types for filter resolution and convolution.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Filter name is not in the catalog.
    ///
    /// Caller-correctable; reported before any processing starts.
    #[error("unknown filter '{name}' (known filters: {known})")]
    UnknownFilter {
        /// The rejected name
        name: String,
        /// Comma-separated list of recognized names
        known: String,
    },

    /// Kernel is larger than the image in at least one dimension.
    ///
    /// No partial output is produced.
    #[error("kernel {kernel}x{kernel} does not fit image {width}x{height}")]
    DimensionMismatch {
        /// Kernel side length
        kernel: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Kernel construction parameters are unusable.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Underlying buffer error.
    #[error(transparent)]
    Core(#[from] parfilt_core::Error),
}

impl FilterError {
    /// Creates a [`FilterError::UnknownFilter`] listing the catalog names.
    pub fn unknown_filter(name: impl Into<String>, known: &[&str]) -> Self {
        Self::UnknownFilter {
            name: name.into(),
            known: known.join(", "),
        }
    }

    /// Returns `true` if this is an [`FilterError::UnknownFilter`].
    #[inline]
    pub fn is_unknown_filter(&self) -> bool {
        matches!(self, Self::UnknownFilter { .. })
    }

    /// Returns `true` if this is a [`FilterError::DimensionMismatch`].
    #[inline]
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_filter_lists_names() {
        let err = FilterError::unknown_filter("gaussian_unknown", &["blur", "sharpen", "edge"]);
        let msg = err.to_string();
        assert!(msg.contains("gaussian_unknown"));
        assert!(msg.contains("blur, sharpen, edge"));
        assert!(err.is_unknown_filter());
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = FilterError::DimensionMismatch {
            kernel: 5,
            width: 2,
            height: 2,
        };
        assert!(err.to_string().contains("5x5"));
        assert!(err.to_string().contains("2x2"));
        assert!(err.is_dimension_mismatch());
    }
}
