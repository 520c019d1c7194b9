//! Pixel sample formats and saturating conversions.
//!
//! Images in this crate are generic over the sample type through the
//! [`PixelFormat`] trait. Two formats are supported:
//!
//! - `u8` - 8-bit samples, the format every intensity kernel works on
//! - `f64` - double precision planes (HSV components, blur output)
//!
//! Conversions go through the raw sample value (`u8` 255 maps to 255.0).
//! Going back to `u8` rounds and saturates.
//!
//! ```
//! use tonal_core::PixelFormat;
//!
//! assert_eq!(200u8.to_f64(), 200.0);
//! assert_eq!(<u8 as PixelFormat>::from_f64(300.7), 255);
//! ```

/// Converts a floating-point value to a byte, rounding to nearest and
/// clamping to `[0, 255]`.
///
/// NaN maps to 0.
///
/// ```
/// use tonal_core::saturate_u8;
///
/// assert_eq!(saturate_u8(-12.0), 0);
/// assert_eq!(saturate_u8(127.5), 128);
/// assert_eq!(saturate_u8(1e9), 255);
/// ```
#[inline]
pub fn saturate_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round() as u8
}

/// Trait for pixel sample types.
pub trait PixelFormat: Copy + Clone + Default + Send + Sync + PartialOrd + 'static {
    /// Raw sample value as f64 (no normalization).
    fn to_f64(self) -> f64;

    /// Build a sample from a raw f64 value.
    ///
    /// Integer formats round and saturate.
    fn from_f64(v: f64) -> Self;

    /// Zero value.
    fn zero() -> Self;
}

impl PixelFormat for u8 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        saturate_u8(v)
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl PixelFormat for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}
