//! Gamma correction.
//!
//! ```text
//! lut[i] = saturate((i / 255)^(1 / gamma) * 255)
//! ```
//!
//! `gamma > 1` brightens mid-tones, `gamma < 1` darkens them. Gamma must be
//! strictly positive and finite; an invalid value is reported before any
//! buffer is touched.
//!
//! # Example
//!
//! ```rust
//! use tonal_core::GrayImage;
//! use tonal_ops::gamma::gamma_correction_gray;
//!
//! let mut img = GrayImage::from_data(3, 1, vec![0, 64, 255]).unwrap();
//! gamma_correction_gray(&mut img, 2.0).unwrap();
//! assert_eq!(img.data(), &[0, 128, 255]);
//!
//! assert!(gamma_correction_gray(&mut img, 0.0).is_err());
//! ```

use tonal_core::{saturate_u8, GrayImage, Lut, RgbaImage};
use tracing::trace;

use crate::{OpsError, OpsResult};

/// Builds the gamma table.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if `gamma` is not strictly
/// positive and finite.
pub fn gamma_lut(gamma: f64) -> OpsResult<Lut> {
    if !(gamma > 0.0 && gamma.is_finite()) {
        return Err(OpsError::InvalidParameter(format!(
            "gamma must be positive and finite, got {gamma}"
        )));
    }
    let inv = 1.0 / gamma;
    Ok(Lut::from_fn(|i| saturate_u8((i as f64 / 255.0).powf(inv) * 255.0)))
}

/// Gamma-corrects a grayscale image in place.
pub fn gamma_correction_gray(image: &mut GrayImage, gamma: f64) -> OpsResult<()> {
    trace!(width = image.width(), height = image.height(), gamma, "gamma_correction_gray");
    let lut = gamma_lut(gamma)?;
    image.apply_lut(&lut);
    Ok(())
}

/// Writes the gamma-corrected copy of `src` into `dst`.
///
/// `dst` is left untouched when `gamma` is invalid.
pub fn gamma_correction_gray_into(src: &GrayImage, dst: &mut GrayImage, gamma: f64) -> OpsResult<()> {
    let lut = gamma_lut(gamma)?;
    *dst = src.clone();
    dst.apply_lut(&lut);
    Ok(())
}

/// Gamma-corrects a color image in place; alpha goes through the same table.
pub fn gamma_correction_rgba(image: &mut RgbaImage, gamma: f64) -> OpsResult<()> {
    trace!(width = image.width(), height = image.height(), gamma, "gamma_correction_rgba");
    let lut = gamma_lut(gamma)?;
    image.apply_lut(&lut);
    Ok(())
}

/// Writes the gamma-corrected copy of `src` into `dst`.
///
/// `dst` is left untouched when `gamma` is invalid.
pub fn gamma_correction_rgba_into(src: &RgbaImage, dst: &mut RgbaImage, gamma: f64) -> OpsResult<()> {
    let lut = gamma_lut(gamma)?;
    *dst = src.clone();
    dst.apply_lut(&lut);
    Ok(())
}
