//! Histogram equalization.
//!
//! Spreads the populated intensity range over `[0, 255]` so that the
//! cumulative distribution of the result is approximately linear.
//!
//! For a grayscale image with `n` samples, `cdf_min` the smallest positive
//! CDF value (at bin `min`) and `max` the last populated bin:
//!
//! ```text
//! lut[x] = round((cdf[x] - cdf_min) / (n - cdf_min) * 255)    x in [min, max]
//! ```
//!
//! Bins outside `[min, max]` hold no samples and keep the identity mapping.
//! A constant image (`n == cdf_min`) is left unchanged.
//!
//! Color images are either equalized per channel (R, G, B and A
//! independently) or, with `use_hsv`, through the value plane of an HSV
//! decomposition which keeps hue, saturation and alpha.

use tonal_core::{hsv_to_rgba_u8, rgba_to_hsv_u8, split_channels, GrayImage, Histogram, Lut, RgbaImage};
use tracing::{debug, trace};

use crate::OpsResult;

/// Builds the equalization table for a histogram.
///
/// Returns the identity table for an empty histogram or when every sample
/// falls into a single bin.
pub fn equalization_lut(hist: &Histogram) -> Lut {
    let mut lut = Lut::identity();
    let cdf = hist.cdf();
    let (Some((min, cdf_min)), Some((max, _))) = (cdf.first_positive(), cdf.first_maximum()) else {
        return lut;
    };
    let n = hist.total();
    debug!(min, max, cdf_min, n, "equalization bounds");

    if n == cdf_min {
        return lut;
    }

    let denom = (n - cdf_min) as f64;
    for x in min..=max {
        let v = (cdf[x] - cdf_min) as f64 / denom * 255.0;
        lut.set(x as u8, v.round() as u8);
    }
    lut
}

/// Equalizes a grayscale image in place. Empty images are left as is.
pub fn equalize_histogram_gray(image: &mut GrayImage) {
    trace!(width = image.width(), height = image.height(), "equalize_histogram_gray");
    if image.is_empty() {
        return;
    }
    let lut = equalization_lut(&Histogram::calculate(image));
    image.apply_lut(&lut);
}

/// Writes the equalized copy of `src` into `dst`.
pub fn equalize_histogram_gray_into(src: &GrayImage, dst: &mut GrayImage) {
    *dst = src.clone();
    equalize_histogram_gray(dst);
}

/// Equalizes a color image in place.
///
/// # Arguments
///
/// * `use_hsv` - Equalize only the HSV value plane instead of each of the
///   four channels
///
/// # Errors
///
/// Only fails if channel planes disagree in size, which cannot happen for
/// planes derived from `image`.
pub fn equalize_histogram_rgba(image: &mut RgbaImage, use_hsv: bool) -> OpsResult<()> {
    trace!(width = image.width(), height = image.height(), use_hsv, "equalize_histogram_rgba");
    if image.is_empty() {
        return Ok(());
    }

    if use_hsv {
        let mut hsv = rgba_to_hsv_u8(image);
        equalize_histogram_gray(&mut hsv.value);
        hsv_to_rgba_u8(&hsv, image)?;
    } else {
        let luts = split_channels(&*image).map(|plane| equalization_lut(&Histogram::calculate(&plane)));
        image.apply_luts(&luts);
    }
    Ok(())
}

/// Writes the equalized copy of `src` into `dst`.
pub fn equalize_histogram_rgba_into(src: &RgbaImage, dst: &mut RgbaImage, use_hsv: bool) -> OpsResult<()> {
    *dst = src.clone();
    equalize_histogram_rgba(dst, use_hsv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonal_core::merge_channels;

    fn gray(w: u32, h: u32, data: Vec<u8>) -> GrayImage {
        GrayImage::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_constant_image_unchanged() {
        let src = GrayImage::filled(5, 5, [42]);
        let mut img = src.clone();
        equalize_histogram_gray(&mut img);
        assert_eq!(img, src);
        assert!(equalization_lut(&Histogram::calculate(&src)).is_identity());
    }

    #[test]
    fn test_two_levels_span_full_range() {
        let mut img = gray(4, 1, vec![100, 100, 150, 150]);
        equalize_histogram_gray(&mut img);
        assert_eq!(img.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_populated_zero_bin() {
        // Bin 0 is populated; it still maps to 0 and the rest spreads out.
        let mut img = gray(4, 1, vec![0, 0, 1, 2]);
        equalize_histogram_gray(&mut img);
        assert_eq!(img.data(), &[0, 0, 128, 255]);
    }

    #[test]
    fn test_unpopulated_entries_stay_identity() {
        let img = gray(3, 1, vec![50, 60, 70]);
        let lut = equalization_lut(&Histogram::calculate(&img));
        assert_eq!(lut.get(10), 10);
        assert_eq!(lut.get(200), 200);
        assert_eq!(lut.get(50), 0);
        assert_eq!(lut.get(70), 255);
    }

    #[test]
    fn test_cdf_roughly_linear() {
        // Skewed ramp: most samples in the dark half.
        let data: Vec<u8> = (0..4096u32).map(|i| ((i * i) / (4096 * 16)) as u8).collect();
        let mut img = gray(64, 64, data);
        equalize_histogram_gray(&mut img);

        let cdf = Histogram::calculate(&img).cdf();
        let n = img.pixel_count() as f64;
        for x in (31..256).step_by(32) {
            let expected = (x + 1) as f64 / 256.0;
            let got = cdf[x] as f64 / n;
            assert!((got - expected).abs() < 0.1, "bin {x}: {got} vs {expected}");
        }
    }

    #[test]
    fn test_empty_noop() {
        let mut img = GrayImage::new(0, 0);
        equalize_histogram_gray(&mut img);
        assert!(img.is_empty());

        let mut rgba = RgbaImage::new(0, 3);
        equalize_histogram_rgba(&mut rgba, true).unwrap();
        assert!(rgba.is_empty());
    }

    #[test]
    fn test_rgba_matches_per_channel() {
        let mut src = RgbaImage::new(4, 2);
        for (i, px) in src.data_mut().chunks_exact_mut(4).enumerate() {
            let i = i as u8;
            px.copy_from_slice(&[10 + i, 200 - 3 * i, 7 * i, 128 + i % 2]);
        }
        let mut dst = RgbaImage::new(0, 0);
        equalize_histogram_rgba_into(&src, &mut dst, false).unwrap();

        let mut planes = split_channels(&src);
        for plane in &mut planes {
            equalize_histogram_gray(plane);
        }
        assert_eq!(dst, merge_channels(&planes).unwrap());
        // Alpha is equalized too: its two levels spread to the ends.
        assert_eq!(dst.pixel(0, 0)[3], 0);
        assert_eq!(dst.pixel(1, 0)[3], 255);
    }

    #[test]
    fn test_hsv_keeps_alpha_and_gray() {
        let mut img = RgbaImage::new(2, 1);
        img.set_pixel(0, 0, [40, 40, 40, 11]);
        img.set_pixel(1, 0, [90, 90, 90, 222]);
        equalize_histogram_rgba(&mut img, true).unwrap();
        assert_eq!(img.pixel(0, 0), [0, 0, 0, 11]);
        assert_eq!(img.pixel(1, 0), [255, 255, 255, 222]);
    }
}
