//! Contrast stretching.
//!
//! Maps the observed sample range `[min, max]` linearly onto `[0, 255]`:
//!
//! ```text
//! lut[x] = 255 * (x - min) / (max - min)     (integer division)
//! ```
//!
//! A flat image (`min == max`) is left unchanged. Color images are stretched
//! per channel with four independent tables, alpha included. The HSV variant
//! instead rescales the saturation and value planes to `[0, 1]` in double
//! precision and leaves hue and alpha alone.
//!
//! # Example
//!
//! ```rust
//! use tonal_core::GrayImage;
//! use tonal_ops::stretch::stretch_contrast_gray;
//!
//! let mut img = GrayImage::from_data(4, 1, vec![10, 10, 10, 200]).unwrap();
//! stretch_contrast_gray(&mut img);
//! assert_eq!(img.data(), &[0, 0, 0, 255]);
//! ```

use tonal_core::{hsv_to_rgba_f64, rgba_to_hsv_f64, split_channels, FloatImage, GrayImage, Lut, RgbaImage};
use tracing::{debug, trace};

use crate::OpsResult;

/// Builds the stretch table for an observed `[min, max]` range.
///
/// Entries outside the range keep the identity mapping. With
/// `min >= max` the table is the identity.
pub fn stretch_lut(min: u8, max: u8) -> Lut {
    let mut lut = Lut::identity();
    if max <= min {
        return lut;
    }
    let (lo, span) = (min as u32, (max - min) as u32);
    for x in min..=max {
        lut.set(x, (255 * (x as u32 - lo) / span) as u8);
    }
    lut
}

fn plane_lut(plane: &GrayImage) -> Lut {
    match plane.min_max() {
        Some((min, max)) => {
            debug!(min, max, "stretch range");
            stretch_lut(min, max)
        }
        None => Lut::identity(),
    }
}

/// Stretches a grayscale image in place.
pub fn stretch_contrast_gray(image: &mut GrayImage) {
    trace!(width = image.width(), height = image.height(), "stretch_contrast_gray");
    if image.is_empty() {
        return;
    }
    let lut = plane_lut(image);
    image.apply_lut(&lut);
}

/// Writes the stretched copy of `src` into `dst`.
pub fn stretch_contrast_gray_into(src: &GrayImage, dst: &mut GrayImage) {
    *dst = src.clone();
    stretch_contrast_gray(dst);
}

/// Stretches every channel of a color image independently, alpha included.
pub fn stretch_contrast_rgba(image: &mut RgbaImage) {
    trace!(width = image.width(), height = image.height(), "stretch_contrast_rgba");
    if image.is_empty() {
        return;
    }
    let luts = split_channels(&*image).map(|plane| plane_lut(&plane));
    image.apply_luts(&luts);
}

/// Writes the per-channel stretched copy of `src` into `dst`.
pub fn stretch_contrast_rgba_into(src: &RgbaImage, dst: &mut RgbaImage) {
    *dst = src.clone();
    stretch_contrast_rgba(dst);
}

/// Rescales a `[0, 1]` plane so its range spans `[0, 1]`.
fn normalize_plane(plane: &mut FloatImage) {
    let Some((min, max)) = plane.min_max() else {
        return;
    };
    debug!(min, max, "hsv plane range");
    let range = max - min;
    if range > 0.0 {
        plane.map_samples(|v| (v - min) / range);
    }
}

/// Stretches saturation and value of a color image in place.
///
/// Hue is never modified, so colors keep their tint. Alpha is preserved.
///
/// # Errors
///
/// Only fails if HSV planes disagree in size with `image`, which cannot
/// happen for planes derived from it.
pub fn stretch_contrast_hsv(image: &mut RgbaImage) -> OpsResult<()> {
    trace!(width = image.width(), height = image.height(), "stretch_contrast_hsv");
    if image.is_empty() {
        return Ok(());
    }
    let mut hsv = rgba_to_hsv_f64(image);
    normalize_plane(&mut hsv.saturation);
    normalize_plane(&mut hsv.value);
    hsv_to_rgba_f64(&hsv, image)?;
    Ok(())
}

/// Writes the HSV-stretched copy of `src` into `dst`.
pub fn stretch_contrast_hsv_into(src: &RgbaImage, dst: &mut RgbaImage) -> OpsResult<()> {
    *dst = src.clone();
    stretch_contrast_hsv(dst)
}
