//! Channel split/merge and RGBA ↔ HSV conversion.
//!
//! # Channel planes
//!
//! Color kernels whose channels are independent decompose an `N`-channel
//! image into `N` single-channel planes, run the grayscale kernel on each,
//! and interleave the planes back:
//!
//! ```rust
//! use tonal_core::{merge_channels, split_channels, RgbaImage};
//!
//! let img = RgbaImage::filled(2, 2, [1, 2, 3, 4]);
//! let [r, g, b, a] = split_channels(&img);
//! assert_eq!(r.pixel(0, 0), [1]);
//! assert_eq!(a.pixel(1, 1), [4]);
//! let back = merge_channels(&[r, g, b, a]).unwrap();
//! assert_eq!(back, img);
//! ```
//!
//! # HSV
//!
//! Hue, saturation and value are produced as three separate planes
//! ([`Hsv`]). Two precisions are provided:
//!
//! | variant | hue | saturation | value |
//! |---------|-----|------------|-------|
//! | `f64`   | `[0, 1)` (degrees / 360) | `[0, 1]` | `[0, 1]` |
//! | `u8`    | `[0, 255]` | `[0, 255]` | `[0, 255]` |
//!
//! The inverse conversions write R, G, B into an existing RGBA image and
//! leave its alpha channel untouched. Round trips are exact only to the
//! precision of the chosen variant.

use crate::{saturate_u8, Error, Image, PixelFormat, Result, RgbaImage};

/// Splits an interleaved image into one plane per channel.
pub fn split_channels<T: PixelFormat, const N: usize>(image: &Image<T, N>) -> [Image<T, 1>; N] {
    let (w, h) = image.dimensions();
    let mut planes: [Vec<T>; N] = std::array::from_fn(|_| Vec::with_capacity(image.pixel_count()));
    for px in image.data().chunks_exact(N) {
        for (plane, &v) in planes.iter_mut().zip(px) {
            plane.push(v);
        }
    }
    planes.map(|data| Image::from_parts(w, h, data))
}

/// Interleaves single-channel planes into one image.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the planes differ in size.
pub fn merge_channels<T: PixelFormat, const N: usize>(planes: &[Image<T, 1>; N]) -> Result<Image<T, N>> {
    let Some(first) = planes.first() else {
        return Err(Error::channel_mismatch(1, 0));
    };
    let (w, h) = first.dimensions();
    if let Some(bad) = planes.iter().find(|p| !p.same_size(first)) {
        return Err(Error::dimension_mismatch((w, h), bad.dimensions()));
    }

    let mut data = Vec::with_capacity(first.pixel_count() * N);
    for i in 0..first.pixel_count() {
        for plane in planes {
            data.push(plane.data()[i]);
        }
    }
    Ok(Image::from_parts(w, h, data))
}

/// Hue, saturation and value planes of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Hsv<T: PixelFormat> {
    /// Hue plane.
    pub hue: Image<T, 1>,
    /// Saturation plane.
    pub saturation: Image<T, 1>,
    /// Value plane.
    pub value: Image<T, 1>,
}

impl<T: PixelFormat> Hsv<T> {
    fn check_planes(&self, target: (u32, u32)) -> Result<()> {
        for plane in [&self.hue, &self.saturation, &self.value] {
            if plane.dimensions() != target {
                return Err(Error::dimension_mismatch(target, plane.dimensions()));
            }
        }
        Ok(())
    }
}

/// Converts one RGB triple to `[h, s, v]`, each in `[0, 1]`.
///
/// Hue is expressed as a fraction of a full turn; gray pixels get hue 0.
///
/// ```rust
/// use tonal_core::rgb_to_hsv;
///
/// let [h, s, v] = rgb_to_hsv(0, 255, 0);
/// assert!((h - 1.0 / 3.0).abs() < 1e-12);
/// assert_eq!((s, v), (1.0, 1.0));
/// ```
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [f64; 3] {
    let (rf, gf, bf) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    if delta == 0.0 {
        return [0.0, s, v];
    }

    let sector = if r >= g && r >= b {
        (gf - bf) / delta
    } else if g >= b {
        2.0 + (bf - rf) / delta
    } else {
        4.0 + (rf - gf) / delta
    };
    let h = (sector / 6.0).rem_euclid(1.0);
    [h, s, v]
}

/// Converts `[h, s, v]` (each in `[0, 1]`) to RGB bytes.
///
/// Hue wraps around, saturation and value are clamped.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    [
        saturate_u8(r * 255.0),
        saturate_u8(g * 255.0),
        saturate_u8(b * 255.0),
    ]
}

fn rgba_to_hsv_with<T, F>(image: &RgbaImage, f: F) -> Hsv<T>
where
    T: PixelFormat,
    F: Fn(f64) -> T,
{
    let (w, h) = image.dimensions();
    let n = image.pixel_count();
    let (mut hue, mut sat, mut val) = (Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n));
    for px in image.data().chunks_exact(4) {
        let [hh, ss, vv] = rgb_to_hsv(px[0], px[1], px[2]);
        hue.push(f(hh));
        sat.push(f(ss));
        val.push(f(vv));
    }
    let plane = |data: Vec<T>| -> Image<T, 1> { Image::from_parts(w, h, data) };
    Hsv {
        hue: plane(hue),
        saturation: plane(sat),
        value: plane(val),
    }
}

/// Converts an RGBA image to double precision HSV planes.
pub fn rgba_to_hsv_f64(image: &RgbaImage) -> Hsv<f64> {
    rgba_to_hsv_with(image, |c| c)
}

/// Converts an RGBA image to byte HSV planes (each component scaled to 255).
pub fn rgba_to_hsv_u8(image: &RgbaImage) -> Hsv<u8> {
    rgba_to_hsv_with(image, |c| saturate_u8(c * 255.0))
}

fn hsv_to_rgba_with<T, F>(hsv: &Hsv<T>, image: &mut RgbaImage, f: F) -> Result<()>
where
    T: PixelFormat,
    F: Fn(T) -> f64,
{
    hsv.check_planes(image.dimensions())?;
    let planes = hsv
        .hue
        .data()
        .iter()
        .zip(hsv.saturation.data())
        .zip(hsv.value.data());
    for (px, ((&h, &s), &v)) in image.data_mut().chunks_exact_mut(4).zip(planes) {
        let [r, g, b] = hsv_to_rgb(f(h), f(s), f(v));
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
    Ok(())
}

/// Writes double precision HSV planes back into the RGB channels of `image`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if a plane differs in size from
/// `image`; nothing is written in that case.
pub fn hsv_to_rgba_f64(hsv: &Hsv<f64>, image: &mut RgbaImage) -> Result<()> {
    hsv_to_rgba_with(hsv, image, |c| c)
}

/// Writes byte HSV planes back into the RGB channels of `image`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if a plane differs in size from
/// `image`; nothing is written in that case.
pub fn hsv_to_rgba_u8(hsv: &Hsv<u8>, image: &mut RgbaImage) -> Result<()> {
    hsv_to_rgba_with(hsv, image, |c| c as f64 / 255.0)
}
