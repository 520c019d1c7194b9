//! Error types for tonal-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer construction and
//! channel plumbing:
//! - Image buffer creation (data length vs. dimensions)
//! - Channel split/merge and HSV conversion (plane dimension mismatch)
//!
//! # Usage
//!
//! ```rust
//! use tonal_core::{GrayImage, Error};
//!
//! let err = GrayImage::from_data(4, 4, vec![0; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! assert!(err.is_dimension_error());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or recombining image buffers.
///
/// Intensity kernels themselves never fail on a well-formed image; these
/// errors only surface from constructors and multi-buffer plumbing.
#[derive(Debug, Error)]
pub enum Error {
    /// Channel count mismatch between source and destination.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },

    /// Image dimensions don't match for the operation.
    ///
    /// Returned when planes that must share a size (split/merge, HSV
    /// planes) do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when the sample buffer length does not equal
    /// `width * height * channels`, or the product overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Returns `true` if this error reports mismatched or invalid dimensions.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::InvalidDimensions { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 200));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x200"));
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_invalid_dimensions_reason() {
        let err = Error::invalid_dimensions(4, 4, "expected 16 elements, got 3");
        assert!(err.to_string().contains("expected 16 elements"));
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_channel_mismatch() {
        let err = Error::channel_mismatch(4, 3);
        assert_eq!(err.to_string(), "channel mismatch: expected 4, got 3");
        assert!(!err.is_dimension_error());
    }
}
