//! 256-entry byte lookup tables.
//!
//! Every per-intensity transform (brightness, equalization, gamma, contrast
//! stretch) reduces to "compute a byte-to-byte mapping once, apply it to
//! every sample". [`Lut`] is that mapping.
//!
//! # Application
//!
//! - [`Image::apply_lut`] applies one table to every channel of a byte image
//! - [`Image::apply_luts`] applies one table per channel
//!
//! With the `parallel` feature (default) application is split across the
//! rayon pool in pixel chunks. There is no cross-pixel dependency, so the
//! result is identical to the sequential path.
//!
//! # Example
//!
//! ```rust
//! use tonal_core::{GrayImage, Lut};
//!
//! let invert = Lut::from_fn(|v| 255 - v);
//! let mut img = GrayImage::from_data(3, 1, vec![0, 100, 255]).unwrap();
//! img.apply_lut(&invert);
//! assert_eq!(img.data(), &[255, 155, 0]);
//! ```
//!
//! A table is tied to the statistics of the image it was built from (for
//! equalization and stretching only the observed range is computed); do not
//! cache one and reuse it on another image.

use crate::Image;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of entries in a byte lookup table.
pub const LUT_SIZE: usize = 256;

/// Pixels per parallel work item.
#[cfg(feature = "parallel")]
const PAR_CHUNK_PIXELS: usize = 4096;

/// A byte-to-byte lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lut {
    table: [u8; LUT_SIZE],
}

impl Lut {
    /// Creates the identity table (`lut[i] == i`).
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Builds a table by evaluating `f` for every input byte.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(u8) -> u8,
    {
        let mut table = [0u8; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self { table }
    }

    /// Returns the mapped value for `v`.
    #[inline]
    pub fn get(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    /// Overwrites the entry for `v`.
    #[inline]
    pub fn set(&mut self, v: u8, out: u8) {
        self.table[v as usize] = out;
    }

    /// Returns `true` if this table maps every value to itself.
    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| i == v as usize)
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> Image<u8, N> {
    /// Applies the same table to every channel of every pixel.
    pub fn apply_lut(&mut self, lut: &Lut) {
        self.apply_luts(&[*lut; N]);
    }

    /// Applies `luts[c]` to channel `c` of every pixel.
    pub fn apply_luts(&mut self, luts: &[Lut; N]) {
        let data = self.data_mut();

        #[cfg(feature = "parallel")]
        data.par_chunks_mut(PAR_CHUNK_PIXELS * N)
            .for_each(|chunk| map_chunk(chunk, luts));

        #[cfg(not(feature = "parallel"))]
        map_chunk(data, luts);
    }
}

#[inline]
fn map_chunk<const N: usize>(chunk: &mut [u8], luts: &[Lut; N]) {
    for px in chunk.chunks_exact_mut(N) {
        for (v, lut) in px.iter_mut().zip(luts) {
            *v = lut.get(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GrayImage, RgbaImage};

    #[test]
    fn test_identity() {
        let lut = Lut::identity();
        assert!(lut.is_identity());
        assert_eq!(lut.get(0), 0);
        assert_eq!(lut.get(255), 255);
        assert_eq!(Lut::default(), lut);
    }

    #[test]
    fn test_set_breaks_identity() {
        let mut lut = Lut::identity();
        lut.set(10, 11);
        assert!(!lut.is_identity());
        assert_eq!(lut.get(10), 11);
    }

    #[test]
    fn test_apply_gray() {
        let lut = Lut::from_fn(|v| v / 2);
        let mut img = GrayImage::from_data(2, 2, vec![0, 10, 200, 255]).unwrap();
        img.apply_lut(&lut);
        assert_eq!(img.data(), &[0, 5, 100, 127]);
    }

    #[test]
    fn test_apply_per_channel() {
        let luts = [
            Lut::from_fn(|_| 1),
            Lut::from_fn(|_| 2),
            Lut::identity(),
            Lut::from_fn(|v| 255 - v),
        ];
        let mut img = RgbaImage::filled(3, 2, [9, 9, 9, 5]);
        img.apply_luts(&luts);
        for (_, _, px) in img.pixels() {
            assert_eq!(px, [1, 2, 9, 250]);
        }
    }

    #[test]
    fn test_apply_large_image_matches_lookup() {
        // Larger than one parallel chunk so several work items run.
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 256) as u8).collect();
        let lut = Lut::from_fn(|v| v.wrapping_mul(3));

        let mut img = GrayImage::from_data(100, 100, data.clone()).unwrap();
        img.apply_lut(&lut);

        let expected: Vec<u8> = data.iter().map(|&v| lut.get(v)).collect();
        assert_eq!(img.data(), expected.as_slice());
    }

    #[test]
    fn test_apply_per_channel_across_chunks() {
        let data: Vec<u8> = (0..90 * 70 * 4u32).map(|i| (i * 13 % 251) as u8).collect();
        let luts = [
            Lut::from_fn(|v| v / 2),
            Lut::identity(),
            Lut::from_fn(|v| 255 - v),
            Lut::from_fn(|v| v.saturating_add(40)),
        ];

        let mut img = RgbaImage::from_data(90, 70, data.clone()).unwrap();
        img.apply_luts(&luts);

        for (i, (&src, &out)) in data.iter().zip(img.data()).enumerate() {
            assert_eq!(out, luts[i % 4].get(src), "sample {i}");
        }
    }
}
