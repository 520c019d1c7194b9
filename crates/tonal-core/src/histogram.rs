//! 256-bin intensity histogram and cumulative distribution.

use crate::GrayImage;

/// Number of histogram bins (one per byte value).
pub const BINS: usize = 256;

/// Frequency table over the sample values of a grayscale image.
///
/// Invariant: the bins sum to [`total`](Histogram::total). Counts are
/// 64-bit, so planes with more than `u32::MAX` samples are counted exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; BINS],
    total: u64,
}

impl Histogram {
    /// Counts every sample of `image`.
    ///
    /// ```rust
    /// use tonal_core::{GrayImage, Histogram};
    ///
    /// let img = GrayImage::from_data(4, 1, vec![3, 3, 9, 255]).unwrap();
    /// let hist = Histogram::calculate(&img);
    /// assert_eq!(hist[3], 2);
    /// assert_eq!(hist[255], 1);
    /// assert_eq!(hist.total(), 4);
    /// ```
    pub fn calculate(image: &GrayImage) -> Self {
        let mut bins = [0u64; BINS];
        for &v in image.data() {
            bins[v as usize] += 1;
        }
        Self {
            bins,
            total: image.data().len() as u64,
        }
    }

    #[cfg(test)]
    fn from_bins(bins: [u64; BINS]) -> Self {
        Self {
            bins,
            total: bins.iter().sum(),
        }
    }

    /// Returns the bin counts.
    #[inline]
    pub fn bins(&self) -> &[u64; BINS] {
        &self.bins
    }

    /// Returns the number of samples counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` when no sample was counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the cumulative distribution of this histogram.
    pub fn cdf(&self) -> Cdf {
        let mut values = [0u64; BINS];
        let mut acc = 0u64;
        for (out, &count) in values.iter_mut().zip(&self.bins) {
            acc += count;
            *out = acc;
        }
        Cdf { values }
    }
}

impl std::ops::Index<usize> for Histogram {
    type Output = u64;

    fn index(&self, bin: usize) -> &u64 {
        &self.bins[bin]
    }
}

/// Running sum of a [`Histogram`].
///
/// Non-decreasing, and `cdf[255]` equals the histogram total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdf {
    values: [u64; BINS],
}

impl Cdf {
    /// Returns the raw cumulative counts.
    #[inline]
    pub fn values(&self) -> &[u64; BINS] {
        &self.values
    }

    /// Smallest positive cumulative count and the first bin holding it.
    ///
    /// This is the first populated bin. `None` when the histogram is empty.
    pub fn first_positive(&self) -> Option<(usize, u64)> {
        self.values
            .iter()
            .enumerate()
            .find(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i, c))
    }

    /// Largest cumulative count and the first bin reaching it.
    ///
    /// Because the CDF is monotonic this is the last populated bin.
    /// `None` when the histogram is empty.
    pub fn first_maximum(&self) -> Option<(usize, u64)> {
        let max = self.values[BINS - 1];
        if max == 0 {
            return None;
        }
        self.values
            .iter()
            .position(|&c| c == max)
            .map(|i| (i, max))
    }
}

impl std::ops::Index<usize> for Cdf {
    type Output = u64;

    fn index(&self, bin: usize) -> &u64 {
        &self.values[bin]
    }
}
