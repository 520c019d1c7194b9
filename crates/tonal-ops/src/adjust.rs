//! Linear brightness/contrast adjustment.
//!
//! `out = saturate(alpha * in + beta)`, evaluated once per byte value into a
//! [`Lut`] and applied to every sample. Color images use the same table on
//! all four channels, alpha included.
//!
//! # Example
//!
//! ```rust
//! use tonal_core::GrayImage;
//! use tonal_ops::adjust::adjust_gray;
//!
//! let mut img = GrayImage::from_data(3, 1, vec![0, 100, 200]).unwrap();
//! adjust_gray(&mut img, 1.5, 10.0);
//! assert_eq!(img.data(), &[10, 160, 255]);
//! ```

use tonal_core::{saturate_u8, GrayImage, Lut, RgbaImage};
use tracing::trace;

/// Builds the table `lut[i] = saturate(alpha * i + beta)`.
pub fn adjust_lut(alpha: f64, beta: f64) -> Lut {
    Lut::from_fn(|i| saturate_u8(alpha * i as f64 + beta))
}

/// Adjusts a grayscale image in place.
///
/// # Arguments
///
/// * `alpha` - Multiplication coefficient
/// * `beta` - Constant added after scaling
pub fn adjust_gray(image: &mut GrayImage, alpha: f64, beta: f64) {
    trace!(width = image.width(), height = image.height(), alpha, beta, "adjust_gray");
    image.apply_lut(&adjust_lut(alpha, beta));
}

/// Writes the adjusted copy of `src` into `dst`.
pub fn adjust_gray_into(src: &GrayImage, dst: &mut GrayImage, alpha: f64, beta: f64) {
    *dst = src.clone();
    adjust_gray(dst, alpha, beta);
}

/// Adjusts a color image in place, applying the same table to R, G, B and A.
pub fn adjust_rgba(image: &mut RgbaImage, alpha: f64, beta: f64) {
    trace!(width = image.width(), height = image.height(), alpha, beta, "adjust_rgba");
    image.apply_lut(&adjust_lut(alpha, beta));
}

/// Writes the adjusted copy of `src` into `dst`.
pub fn adjust_rgba_into(src: &RgbaImage, dst: &mut RgbaImage, alpha: f64, beta: f64) {
    *dst = src.clone();
    adjust_rgba(dst, alpha, beta);
}
