//! Unsharp mask sharpening.
//!
//! Subtracts a weighted Gaussian blur from the image and renormalizes:
//!
//! ```text
//! out = saturate((in - w * blur(in)) / (1 - w))      0 <= w < 1
//! ```
//!
//! A weight outside `[0, 1)` (or NaN) leaves the image untouched. On color
//! images only R, G and B are sharpened; alpha is copied bit for bit.
//!
//! # Example
//!
//! ```rust
//! use tonal_core::GrayImage;
//! use tonal_ops::sharpen::unsharp_mask_gray;
//!
//! let mut img = GrayImage::filled(6, 6, [90]);
//! img.set_pixel(3, 3, [160]);
//! unsharp_mask_gray(&mut img, 3, 0.5);
//! assert!(img.pixel(3, 3)[0] > 160);
//! assert!(img.pixel(2, 3)[0] < 90);
//! ```

use tonal_core::{saturate_u8, split_channels, FloatImage, GrayImage, RgbaImage};
use tracing::trace;

use crate::filter::{blur_with, GaussianKernel};

/// Unsharp mask parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnsharpParams {
    /// Gaussian kernel size (made odd).
    pub size: usize,
    /// Sharpening weight in `[0, 1)`.
    pub weight: f64,
}

impl UnsharpParams {
    /// Creates unsharp mask parameters.
    pub fn new(size: usize, weight: f64) -> Self {
        Self { size, weight }
    }

    /// Returns `true` if the weight lies in `[0, 1)`.
    pub fn is_active(&self) -> bool {
        (0.0..1.0).contains(&self.weight)
    }

    /// Sharpens a grayscale image in place.
    pub fn apply_gray(&self, image: &mut GrayImage) {
        unsharp_mask_gray(image, self.size, self.weight);
    }

    /// Sharpens the RGB channels of a color image in place.
    pub fn apply_rgba(&self, image: &mut RgbaImage) {
        unsharp_mask_rgba(image, self.size, self.weight);
    }
}

impl Default for UnsharpParams {
    fn default() -> Self {
        Self { size: 7, weight: 0.6 }
    }
}

#[inline]
fn sharpen_sample(v: u8, blurred: f64, weight: f64) -> u8 {
    saturate_u8((v as f64 - weight * blurred) / (1.0 - weight))
}

/// Sharpens a grayscale image in place.
///
/// # Arguments
///
/// * `size` - Gaussian kernel size (made odd)
/// * `weight` - Sharpening weight; outside `[0, 1)` this is a no-op
pub fn unsharp_mask_gray(image: &mut GrayImage, size: usize, weight: f64) {
    trace!(width = image.width(), height = image.height(), size, weight, "unsharp_mask_gray");
    if !UnsharpParams::new(size, weight).is_active() || image.is_empty() {
        return;
    }
    let blurred = blur_with(&*image, &GaussianKernel::new(size, 0.0));
    for (v, &b) in image.data_mut().iter_mut().zip(blurred.data()) {
        *v = sharpen_sample(*v, b, weight);
    }
}

/// Writes the sharpened copy of `src` into `dst`.
pub fn unsharp_mask_gray_into(src: &GrayImage, dst: &mut GrayImage, size: usize, weight: f64) {
    *dst = src.clone();
    unsharp_mask_gray(dst, size, weight);
}

/// Sharpens the R, G and B channels of a color image in place.
///
/// Alpha is left exactly as it was.
pub fn unsharp_mask_rgba(image: &mut RgbaImage, size: usize, weight: f64) {
    trace!(width = image.width(), height = image.height(), size, weight, "unsharp_mask_rgba");
    if !UnsharpParams::new(size, weight).is_active() || image.is_empty() {
        return;
    }

    let kernel = GaussianKernel::new(size, 0.0);
    let [r, g, b, _] = split_channels(&*image);
    let blurred: [FloatImage; 3] = [&r, &g, &b].map(|plane| blur_with(plane, &kernel));

    for (i, px) in image.data_mut().chunks_exact_mut(4).enumerate() {
        for (c, plane) in blurred.iter().enumerate() {
            px[c] = sharpen_sample(px[c], plane.data()[i], weight);
        }
    }
}

/// Writes the sharpened copy of `src` into `dst`.
pub fn unsharp_mask_rgba_into(src: &RgbaImage, dst: &mut RgbaImage, size: usize, weight: f64) {
    *dst = src.clone();
    unsharp_mask_rgba(dst, size, weight);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: u32, h: u32) -> GrayImage {
        let data = (0..w * h)
            .map(|i| if ((i % w) / 2 + (i / w) / 2) % 2 == 0 { 60 } else { 180 })
            .collect();
        GrayImage::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_out_of_range_weight_is_noop() {
        let src = checker(8, 8);
        for w in [1.0, 1.5, -0.1, f64::NAN] {
            let mut img = src.clone();
            unsharp_mask_gray(&mut img, 5, w);
            assert_eq!(img, src, "weight {w}");
        }
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let src = checker(8, 8);
        let mut dst = GrayImage::new(0, 0);
        unsharp_mask_gray_into(&src, &mut dst, 5, 0.0);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_constant_unchanged() {
        let mut img = GrayImage::filled(7, 5, [123]);
        unsharp_mask_gray(&mut img, 5, 0.8);
        assert!(img.data().iter().all(|&v| v == 123));
    }

    #[test]
    fn test_increases_local_contrast() {
        let src = checker(16, 16);
        let mut img = src.clone();
        unsharp_mask_gray(&mut img, 3, 0.5);
        let (lo, hi) = img.min_max().unwrap();
        assert!(lo < 60);
        assert!(hi > 180);
    }

    #[test]
    fn test_even_size_matches_next_odd() {
        let src = checker(10, 10);
        let mut a = src.clone();
        let mut b = src.clone();
        unsharp_mask_gray(&mut a, 4, 0.4);
        unsharp_mask_gray(&mut b, 5, 0.4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rgba_keeps_alpha() {
        let mut src = RgbaImage::new(6, 6);
        for (i, px) in src.data_mut().chunks_exact_mut(4).enumerate() {
            let i = i as u8;
            px.copy_from_slice(&[i * 7, 255 - i * 5, i * 3, i.wrapping_mul(41)]);
        }
        let mut dst = RgbaImage::new(0, 0);
        unsharp_mask_rgba_into(&src, &mut dst, 3, 0.7);
        for (a, b) in src.data().chunks_exact(4).zip(dst.data().chunks_exact(4)) {
            assert_eq!(a[3], b[3]);
        }
        assert_ne!(src, dst);
    }

    #[test]
    fn test_params() {
        let p = UnsharpParams::default();
        assert_eq!(p.size, 7);
        assert!(p.is_active());
        assert!(!UnsharpParams::new(3, 1.0).is_active());

        let mut img = checker(8, 8);
        let mut expected = img.clone();
        p.apply_gray(&mut img);
        unsharp_mask_gray(&mut expected, 7, 0.6);
        assert_eq!(img, expected);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_serde() {
        let p = UnsharpParams::new(9, 0.25);
        let json = serde_json::to_string(&p).unwrap();
        let back: UnsharpParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
