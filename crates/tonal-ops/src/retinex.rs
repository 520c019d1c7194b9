//! Multi-scale Retinex with color restoration (MSRCR).
//!
//! Enhances local contrast and recovers detail in shadows by comparing each
//! channel with Gaussian-blurred versions of itself at several scales, then
//! restoring color balance from the ratio of each channel to the pixel sum.
//!
//! For each channel `c` in R, G, B with `I_c = in_c + 1`:
//!
//! ```text
//! res_c  = sum over sigma of (ln I_c - ln blur(I_c, sigma)) / scale_div
//! dest_c = (ln(128 * I_c) - ln(R + G + B + 3)) * res_c
//! out_c  = saturate(255 * (dest_c - lo) / range)
//! ```
//!
//! where `lo = mean - dynamic * std` and `range = 2 * dynamic * std` over all
//! `dest` samples. Alpha is never modified.
//!
//! # Example
//!
//! ```rust
//! use tonal_core::RgbaImage;
//! use tonal_ops::retinex::{retinex, RetinexParams};
//!
//! let mut img = RgbaImage::filled(32, 32, [20, 30, 40, 255]);
//! img.set_pixel(16, 16, [200, 180, 90, 255]);
//! retinex(&mut img, &RetinexParams { scale: 32, ..Default::default() }).unwrap();
//! assert_eq!(img.pixel(0, 0)[3], 255);
//! ```

use tonal_core::{saturate_u8, split_channels, FloatImage, RgbaImage};
use tracing::{debug, trace};

use crate::filter::gaussian_blur;
use crate::{OpsError, OpsResult};

/// Smallest accepted `scale`.
pub const MIN_SCALE: u32 = 16;
/// Largest accepted `scale`.
pub const MAX_SCALE: u32 = 250;
/// Largest accepted `scale_div`.
pub const MAX_SCALE_DIV: u32 = 8;

/// Ranges below this are treated as zero when normalizing.
const RANGE_EPSILON: f64 = 1e-3;

// ============================================================================
// Parameters
// ============================================================================

/// Distribution of blur sigmas when `scale_div > 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetinexLevel {
    /// Evenly spaced sigmas; treats all intensities alike.
    #[default]
    Uniform,
    /// Sigmas packed towards small values; enhances dark regions.
    Low,
    /// Sigmas packed towards `scale`; enhances bright regions.
    High,
}

/// Retinex parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetinexParams {
    /// Depth of the effect, in `[16, 250]`.
    pub scale: u32,
    /// Number of blur scales, in `[1, 8]`.
    pub scale_div: u32,
    /// Sigma distribution for `scale_div > 2`.
    pub level: RetinexLevel,
    /// Output contrast control; larger values give less saturated results.
    pub dynamic: f64,
    /// Blur kernel size. `None` uses half the smaller image side, made odd.
    pub kernel_size: Option<usize>,
}

impl Default for RetinexParams {
    fn default() -> Self {
        Self {
            scale: 240,
            scale_div: 3,
            level: RetinexLevel::Uniform,
            dynamic: 1.2,
            kernel_size: None,
        }
    }
}

impl RetinexParams {
    /// Checks `scale` and `scale_div` ranges.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> OpsResult<()> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.scale) {
            return Err(OpsError::InvalidParameter(format!(
                "retinex scale must be in [{MIN_SCALE}, {MAX_SCALE}], got {}",
                self.scale
            )));
        }
        if !(1..=MAX_SCALE_DIV).contains(&self.scale_div) {
            return Err(OpsError::InvalidParameter(format!(
                "retinex scale_div must be in [1, {MAX_SCALE_DIV}], got {}",
                self.scale_div
            )));
        }
        Ok(())
    }

    /// Blur kernel size used for an image of the given dimensions.
    pub fn kernel_size_for(&self, width: u32, height: u32) -> usize {
        self.kernel_size.unwrap_or_else(|| {
            let k = (width.min(height) / 2) as usize;
            k - k % 2 + 1
        })
    }
}

/// Returns the blur sigmas for a scale configuration.
///
/// The result has one entry per scale (`scale_div` entries, capped at 8).
///
/// ```rust
/// use tonal_ops::retinex::{retinex_scales, RetinexLevel};
///
/// assert_eq!(retinex_scales(240, 1, RetinexLevel::Uniform), vec![120.0]);
/// assert_eq!(retinex_scales(240, 3, RetinexLevel::Uniform), vec![2.0, 82.0, 162.0]);
/// ```
pub fn retinex_scales(scale: u32, scale_div: u32, level: RetinexLevel) -> Vec<f64> {
    let scale = scale as f64;
    let div = scale_div.min(MAX_SCALE_DIV);
    match div {
        0 => Vec::new(),
        1 => vec![scale / 2.0],
        2 => vec![scale / 2.0, scale],
        _ => {
            let n = div as f64;
            let log_step = (scale - 2.0).ln() / n;
            (0..div)
                .map(|i| {
                    let i = i as f64;
                    match level {
                        RetinexLevel::Uniform => 2.0 + i * scale / n,
                        RetinexLevel::Low => 2.0 + 10f64.powf(i * log_step / std::f64::consts::LN_10),
                        RetinexLevel::High => scale - 10f64.powf(i * log_step / std::f64::consts::LN_10),
                    }
                })
                .collect()
        }
    }
}

// ============================================================================
// Apply
// ============================================================================

/// Applies Retinex to a color image in place.
///
/// Empty images are left as is. Alpha is preserved.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `params` is out of range; the
/// image is not modified in that case.
pub fn retinex(image: &mut RgbaImage, params: &RetinexParams) -> OpsResult<()> {
    trace!(
        width = image.width(),
        height = image.height(),
        scale = params.scale,
        scale_div = params.scale_div,
        mode = ?params.level,
        dynamic = params.dynamic,
        "retinex"
    );
    params.validate()?;
    if image.is_empty() {
        return Ok(());
    }
    msrcr(image, params);
    Ok(())
}

/// Writes the Retinex-enhanced copy of `src` into `dst`.
///
/// `dst` is left untouched when `params` is out of range.
pub fn retinex_into(src: &RgbaImage, dst: &mut RgbaImage, params: &RetinexParams) -> OpsResult<()> {
    params.validate()?;
    *dst = src.clone();
    retinex(dst, params)
}

fn msrcr(image: &mut RgbaImage, params: &RetinexParams) {
    let (w, h) = image.dimensions();
    let n = image.pixel_count();
    let sigmas = retinex_scales(params.scale, params.scale_div, params.level);
    let kernel_size = params.kernel_size_for(w, h);
    let weight = 1.0 / params.scale_div as f64;
    debug!(kernel_size, ?sigmas, "retinex scales");

    // Shifted by one so the logarithms stay finite.
    let [r, g, b, _] = split_channels(&*image);
    let shifted: [FloatImage; 3] = [&r, &g, &b].map(|plane| {
        let mut f: FloatImage = plane.convert_format();
        f.map_samples(|v| v + 1.0);
        f
    });

    let responses: [Vec<f64>; 3] = std::array::from_fn(|c| {
        let plane = &shifted[c];
        let mut res = vec![0.0; n];
        for &sigma in &sigmas {
            let blurred = gaussian_blur(plane, kernel_size, sigma);
            for ((acc, &v), &bl) in res.iter_mut().zip(plane.data()).zip(blurred.data()) {
                *acc += weight * (v.ln() - bl.ln());
            }
        }
        res
    });

    let mut dest = Vec::with_capacity(n * 3);
    for i in 0..n {
        let sum: f64 = shifted.iter().map(|p| p.data()[i]).sum();
        let log_sum = sum.ln();
        for c in 0..3 {
            let v = shifted[c].data()[i];
            dest.push(((128.0 * v).ln() - log_sum) * responses[c][i]);
        }
    }

    let count = dest.len() as f64;
    let mean = dest.iter().sum::<f64>() / count;
    let std = (dest.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / count).sqrt();
    let lo = mean - params.dynamic * std;
    let mut range = 2.0 * params.dynamic * std;
    if range.abs() < RANGE_EPSILON {
        range = 1.0;
    }
    debug!(mean, std, lo, range, "retinex normalization");

    for (px, d) in image.data_mut().chunks_exact_mut(4).zip(dest.chunks_exact(3)) {
        for c in 0..3 {
            px[c] = saturate_u8(255.0 * (d[c] - lo) / range);
        }
    }
}
