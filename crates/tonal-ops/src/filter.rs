//! Separable Gaussian blur.
//!
//! The blur produces a double precision plane of the same size as its
//! input and is used by [`unsharp_mask`](crate::sharpen) and
//! [`retinex`](crate::retinex).
//!
//! # Kernel
//!
//! [`GaussianKernel`] is a 1D normalized kernel applied horizontally then
//! vertically. Even sizes are bumped to the next odd size. A non-positive
//! sigma selects `(size - 1) / 6`, so the kernel spans about three standard
//! deviations on each side.
//!
//! # Borders
//!
//! Samples outside the image are mirrored without repeating the edge
//! sample (`dcb|abcd|cba`).
//!
//! # Example
//!
//! ```rust
//! use tonal_core::GrayImage;
//! use tonal_ops::filter::gaussian_blur;
//!
//! let img = GrayImage::filled(8, 8, [100]);
//! let blurred = gaussian_blur(&img, 5, 0.0);
//! assert!((blurred.pixel(3, 3)[0] - 100.0).abs() < 1e-9);
//! ```

use tonal_core::{FloatImage, Image, PixelFormat};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// 1D normalized Gaussian kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    /// Kernel weights, `size` entries summing to 1.
    pub data: Vec<f64>,
    /// Standard deviation actually used.
    pub sigma: f64,
}

impl GaussianKernel {
    /// Creates a Gaussian kernel.
    ///
    /// # Arguments
    ///
    /// * `size` - Kernel size (will be made odd)
    /// * `sigma` - Standard deviation; `<= 0` derives it from `size`
    ///
    /// # Example
    ///
    /// ```rust
    /// use tonal_ops::filter::GaussianKernel;
    ///
    /// let k = GaussianKernel::new(4, 0.0);
    /// assert_eq!(k.size(), 5);
    /// assert!((k.data.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    /// ```
    pub fn new(size: usize, sigma: f64) -> Self {
        let size = if size % 2 == 0 { size + 1 } else { size };
        let sigma = if sigma > 0.0 { sigma } else { (size - 1) as f64 / 6.0 };
        let half = (size / 2) as isize;

        if sigma <= 0.0 || !sigma.is_finite() {
            return Self::unit(size, sigma);
        }

        let sigma2 = 2.0 * sigma * sigma;
        let mut data: Vec<f64> = (-half..=half)
            .map(|i| (-((i * i) as f64) / sigma2).exp())
            .collect();

        // Normalize
        let sum: f64 = data.iter().sum();
        for w in &mut data {
            *w /= sum;
        }

        Self { data, sigma }
    }

    /// Kernel with all weight on the center tap.
    fn unit(size: usize, sigma: f64) -> Self {
        let mut data = vec![0.0; size];
        data[size / 2] = 1.0;
        Self { data, sigma }
    }

    /// Returns the number of taps.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> usize {
        self.data.len() / 2
    }
}

/// Mirrors `i` into `[0, len)` without repeating the edge sample.
#[inline]
fn reflect(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    (if m >= len as isize { period - m } else { m }) as usize
}

fn for_each_row<F>(dst: &mut [f64], width: usize, f: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Blurs a single-channel plane with a Gaussian kernel.
///
/// # Arguments
///
/// * `src` - Source plane (byte or floating point samples, raw values)
/// * `size` - Kernel size (made odd)
/// * `sigma` - Standard deviation; `<= 0` derives it from `size`
///
/// # Returns
///
/// Blurred plane with the same dimensions as `src`.
pub fn gaussian_blur<T: PixelFormat>(src: &Image<T, 1>, size: usize, sigma: f64) -> FloatImage {
    let kernel = GaussianKernel::new(size, sigma);
    blur_with(src, &kernel)
}

/// Blurs a single-channel plane with a prepared kernel.
pub fn blur_with<T: PixelFormat>(src: &Image<T, 1>, kernel: &GaussianKernel) -> FloatImage {
    let (w, h) = src.dimensions();
    trace!(width = w, height = h, size = kernel.size(), sigma = kernel.sigma, "gaussian_blur");

    let mut out = FloatImage::new(w, h);
    if src.is_empty() {
        return out;
    }

    let (w, h) = (w as usize, h as usize);
    let r = kernel.radius() as isize;
    let input = src.data();

    // Horizontal pass
    let mut tmp = vec![0.0f64; w * h];
    for_each_row(&mut tmp, w, |y, row| {
        let line = &input[y * w..(y + 1) * w];
        for (x, dst) in row.iter_mut().enumerate() {
            *dst = kernel
                .data
                .iter()
                .enumerate()
                .map(|(k, &kw)| kw * line[reflect(x as isize + k as isize - r, w)].to_f64())
                .sum();
        }
    });

    // Vertical pass
    for_each_row(out.data_mut(), w, |y, row| {
        for (k, &kw) in kernel.data.iter().enumerate() {
            let sy = reflect(y as isize + k as isize - r, h);
            let line = &tmp[sy * w..(sy + 1) * w];
            for (dst, &v) in row.iter_mut().zip(line) {
                *dst += kw * v;
            }
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tonal_core::GrayImage;

    #[test]
    fn test_kernel_gaussian() {
        let k = GaussianKernel::new(7, 1.0);
        assert_eq!(k.size(), 7);
        assert_eq!(k.radius(), 3);

        // Sum should be 1.0
        assert_abs_diff_eq!(k.data.iter().sum::<f64>(), 1.0, epsilon = 1e-12);

        // Center should be highest, symmetric
        assert!(k.data[3] > k.data[0]);
        assert_abs_diff_eq!(k.data[1], k.data[5], epsilon = 1e-15);
    }

    #[test]
    fn test_kernel_default_sigma() {
        let k = GaussianKernel::new(7, 0.0);
        assert_abs_diff_eq!(k.sigma, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kernel_size_one_is_identity() {
        let k = GaussianKernel::new(1, 0.0);
        assert_eq!(k.data, vec![1.0]);
        let k = GaussianKernel::new(0, 0.0);
        assert_eq!(k.data, vec![1.0]);
    }

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(-1, 5), 1);
        assert_eq!(reflect(-2, 5), 2);
        assert_eq!(reflect(5, 5), 3);
        assert_eq!(reflect(6, 5), 2);
        assert_eq!(reflect(3, 1), 0);
        // Radius larger than the image wraps around again.
        assert_eq!(reflect(-3, 2), 1);
        assert_eq!(reflect(4, 2), 0);
    }

    #[test]
    fn test_blur_constant_is_constant() {
        let img = GrayImage::filled(9, 4, [77]);
        let blurred = gaussian_blur(&img, 7, 0.0);
        for &v in blurred.data() {
            assert_abs_diff_eq!(v, 77.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_blur_preserves_mass_of_impulse() {
        let mut img = GrayImage::new(15, 15);
        img.set_pixel(7, 7, [255]);
        let blurred = gaussian_blur(&img, 5, 1.0);
        let sum: f64 = blurred.data().iter().sum();
        // Impulse is far enough from the border that nothing is mirrored.
        assert_abs_diff_eq!(sum, 255.0, epsilon = 1e-9);
        assert!(blurred.pixel(7, 7)[0] < 255.0);
        assert!(blurred.pixel(7, 7)[0] > blurred.pixel(8, 7)[0]);
    }

    #[test]
    fn test_blur_unit_kernel_copies() {
        let img = GrayImage::from_data(3, 1, vec![1, 2, 3]).unwrap();
        let blurred = gaussian_blur(&img, 1, 0.0);
        assert_eq!(blurred.data(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_blur_empty() {
        let img = GrayImage::new(0, 0);
        assert!(gaussian_blur(&img, 3, 0.0).is_empty());
    }
}
