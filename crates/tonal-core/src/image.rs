//! Image buffer type for intensity processing.
//!
//! [`Image`] is an owned, dense, row-major buffer of `width * height` pixels
//! with `N` interleaved samples of type `T` per pixel:
//!
//! - `T: PixelFormat` - Sample type (`u8`, `f64`)
//! - `N` - Number of channels (1 for grayscale planes, 4 for RGBA)
//!
//! # Memory Layout
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! There is no row padding: the buffer always holds exactly
//! `width * height * N` samples.
//!
//! # Usage
//!
//! ```rust
//! use tonal_core::{GrayImage, RgbaImage};
//!
//! let mut gray = GrayImage::new(4, 2);
//! gray.set_pixel(1, 0, [200]);
//! assert_eq!(gray.pixel(1, 0), [200]);
//! assert_eq!(gray.min_max(), Some((0, 200)));
//!
//! let rgba = RgbaImage::filled(3, 3, [10, 20, 30, 255]);
//! assert_eq!(rgba.pixel(2, 2), [10, 20, 30, 255]);
//! ```
//!
//! # Used By
//!
//! - [`crate::lut`] - bulk table application
//! - [`crate::histogram`] - frequency scans
//! - [`crate::convert`] - channel split/merge and HSV planes
//! - `tonal-ops` - every intensity kernel

use crate::{Error, PixelFormat, Result};
use std::sync::Arc;

/// 8-bit single channel image.
pub type GrayImage = Image<u8, 1>;

/// 8-bit four channel image, samples ordered R, G, B, A.
pub type RgbaImage = Image<u8, 4>;

/// Double precision single channel plane.
pub type FloatImage = Image<f64, 1>;

/// Owned image buffer with a compile-time sample type and channel count.
///
/// # Memory Management
///
/// The sample buffer is stored in an [`Arc<Vec<T>>`]: cloning is O(1) and
/// the first mutation of a shared buffer copies it (copy-on-write). The
/// `*_into` variants of the intensity kernels rely on this, so copying the
/// source into the destination costs nothing until the kernel writes.
///
/// # Example
///
/// ```rust
/// use tonal_core::RgbaImage;
///
/// let src = RgbaImage::filled(16, 16, [40, 0, 0, 255]);
/// let mut img = src.clone();
/// img.set_pixel(8, 8, [255, 0, 0, 255]);
/// assert_eq!(img.pixel(8, 8)[0], 255);
/// assert_eq!(src.pixel(8, 8)[0], 40);
/// ```
#[derive(Clone)]
pub struct Image<T: PixelFormat, const N: usize> {
    /// Sample buffer (Arc for cheap cloning)
    data: Arc<Vec<T>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl<T: PixelFormat, const N: usize> Image<T, N> {
    /// Creates a new image filled with zeros.
    ///
    /// A `0x0` (or `0xN`) image is valid and holds no samples.
    pub fn new(width: u32, height: u32) -> Self {
        let sample_count = width as usize * height as usize * N;
        Self {
            data: Arc::new(vec![T::zero(); sample_count]),
            width,
            height,
        }
    }

    /// Creates an image from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not exactly
    /// `width * height * N`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tonal_core::GrayImage;
    ///
    /// let img = GrayImage::from_data(2, 2, vec![0, 64, 128, 255]).unwrap();
    /// assert_eq!(img.pixel(1, 1), [255]);
    /// assert!(GrayImage::from_data(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(N))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Builds an image from a buffer whose length is known to be correct.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * N);
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates an image filled with a specific pixel value.
    pub fn filled(width: u32, height: u32, pixel: [T; N]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * N);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub const fn channels(&self) -> usize {
        N
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the raw interleaved samples mutably.
    ///
    /// If the data is shared (Arc refcount > 1), this will clone the data
    /// to ensure exclusive access (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * N
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [T; N] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut result = [T::zero(); N];
        result.copy_from_slice(&self.data[offset..offset + N]);
        result
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [T; N]) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + N].copy_from_slice(&pixel);
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [T; N])> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to every sample of every channel in place.
    ///
    /// ```rust
    /// use tonal_core::FloatImage;
    ///
    /// let mut plane = FloatImage::filled(2, 2, [0.25]);
    /// plane.map_samples(|v| v * 2.0);
    /// assert_eq!(plane.pixel(0, 0), [0.5]);
    /// ```
    pub fn map_samples<F>(&mut self, f: F)
    where
        F: Fn(T) -> T,
    {
        for v in Arc::make_mut(&mut self.data).iter_mut() {
            *v = f(*v);
        }
    }

    /// Converts to a different sample format, keeping raw values.
    ///
    /// Integer targets round and saturate (see [`PixelFormat::from_f64`]).
    ///
    /// ```rust
    /// use tonal_core::{FloatImage, GrayImage};
    ///
    /// let gray = GrayImage::filled(2, 1, [42]);
    /// let plane: FloatImage = gray.convert_format();
    /// assert_eq!(plane.pixel(1, 0), [42.0]);
    /// ```
    pub fn convert_format<T2: PixelFormat>(&self) -> Image<T2, N> {
        Image {
            data: Arc::new(self.data.iter().map(|v| T2::from_f64(v.to_f64())).collect()),
            width: self.width,
            height: self.height,
        }
    }

    /// Returns `true` when both images share width and height.
    #[inline]
    pub fn same_size<U: PixelFormat, const M: usize>(&self, other: &Image<U, M>) -> bool {
        self.dimensions() == other.dimensions()
    }
}

impl<T: PixelFormat> Image<T, 1> {
    /// Returns the smallest and largest sample, or `None` for an empty image.
    ///
    /// Works for byte and floating-point planes alike. NaN samples never
    /// win a comparison and are therefore ignored unless every sample is NaN.
    pub fn min_max(&self) -> Option<(T, T)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        }))
    }
}

impl<T: PixelFormat, const N: usize> PartialEq for Image<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.data == other.data
    }
}

impl<T: PixelFormat, const N: usize> std::fmt::Debug for Image<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &N)
            .field("format", &std::any::type_name::<T>())
            .finish()
    }
}
