//! # tonal-core
//!
//! Core types for 8-bit intensity processing.
//!
//! This crate provides the buffer and color primitives the intensity kernels
//! in `tonal-ops` are built on:
//!
//! - [`Image`] - Dense row-major buffer, generic over sample type and channel count
//! - [`PixelFormat`] - Sample types (`u8`, `f64`) and [`saturate_u8`]
//! - [`Lut`] - 256-entry byte lookup table and its bulk application
//! - [`Histogram`], [`Cdf`] - 256-bin frequency table and running sum
//! - [`split_channels`], [`merge_channels`] - Channel plane plumbing
//! - [`Hsv`] - RGBA ↔ HSV conversion in byte and double precision
//!
//! ## Crate Structure
//!
//! ```text
//! tonal-core (this crate)
//!    ^
//!    |
//!    +-- tonal-ops (intensity kernels, Gaussian blur)
//!    +-- tonal-tests, tonal-bench
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Split LUT application across the rayon pool (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod error;
pub mod histogram;
pub mod image;
pub mod lut;
pub mod pixel;

// Re-exports for convenience
pub use convert::{
    hsv_to_rgb, hsv_to_rgba_f64, hsv_to_rgba_u8, merge_channels, rgb_to_hsv, rgba_to_hsv_f64,
    rgba_to_hsv_u8, split_channels, Hsv,
};
pub use error::{Error, Result};
pub use histogram::{Cdf, Histogram};
pub use image::{FloatImage, GrayImage, Image, RgbaImage};
pub use lut::Lut;
pub use pixel::{saturate_u8, PixelFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use tonal_core::prelude::*;
///
/// let img = GrayImage::filled(2, 2, [9]);
/// assert_eq!(Histogram::calculate(&img)[9], 4);
/// ```
pub mod prelude {
    pub use crate::convert::{merge_channels, split_channels, Hsv};
    pub use crate::error::{Error, Result};
    pub use crate::histogram::{Cdf, Histogram};
    pub use crate::image::{FloatImage, GrayImage, Image, RgbaImage};
    pub use crate::lut::Lut;
    pub use crate::pixel::{saturate_u8, PixelFormat};
}
