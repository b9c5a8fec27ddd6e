//! Convolution kernel type and the fixed filter matrices.
//!
//! Weights are signed integers and both execution paths accumulate in
//! `i32`, so the arithmetic carries no rounding-order freedom: the
//! sequential reference and the parallel dispatch produce bit-identical
//! output. Normalization is `(sum + divisor/2) / divisor + bias` with a
//! truncating divide; that rounds to nearest only for non-negative sums,
//! which holds for every shipped kernel with divisor > 1 (blur is all
//! positive weights).

use crate::error::{FilterError, FilterResult};

/// Largest sample value; convolution results clamp to `0..=MAX_SAMPLE`.
pub const MAX_SAMPLE: i32 = 255;

/// Square convolution kernel with integer weights.
///
/// Treated as immutable once constructed; the catalog hands out fresh
/// copies rather than sharing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    /// Kernel weights, row-major, `size * size` entries.
    pub weights: Vec<i32>,
    /// Side length (must be odd so a center pixel exists).
    pub size: u32,
    /// Normalization divisor applied after accumulation (>= 1).
    pub divisor: i32,
    /// Offset added after division.
    pub bias: i32,
}

impl Kernel {
    /// Creates a kernel from raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] when `size` is even or zero,
    /// when `weights.len() != size * size`, or when `divisor < 1`.
    pub fn new(weights: Vec<i32>, size: u32, divisor: i32, bias: i32) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "size must be odd, got {size}"
            )));
        }
        let expected = (size * size) as usize;
        if weights.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "weight count {} doesn't match {size}x{size}",
                weights.len()
            )));
        }
        if divisor < 1 {
            return Err(FilterError::InvalidKernel(format!(
                "divisor must be >= 1, got {divisor}"
            )));
        }
        Ok(Self {
            weights,
            size,
            divisor,
            bias,
        })
    }

    /// Creates the 3x3 averaging blur kernel (uniform weights, divisor 9).
    ///
    /// # Example
    ///
    /// ```rust
    /// use parfilt_filters::Kernel;
    ///
    /// let k = Kernel::box_blur();
    /// assert_eq!(k.size, 3);
    /// assert_eq!(k.weights.iter().sum::<i32>(), k.divisor);
    /// ```
    pub fn box_blur() -> Self {
        Self {
            weights: vec![1; 9],
            size: 3,
            divisor: 9,
            bias: 0,
        }
    }

    /// Creates the 3x3 sharpening kernel (identity plus negative Laplacian).
    ///
    /// The center weight exceeds the sum of the neighbor magnitudes by one,
    /// so a constant field passes through unchanged while local contrast is
    /// amplified.
    pub fn sharpen() -> Self {
        Self {
            weights: vec![
                0, -1, 0,
                -1, 5, -1,
                0, -1, 0,
            ],
            size: 3,
            divisor: 1,
            bias: 0,
        }
    }

    /// Creates the 3x3 edge-detection kernel (zero-sum Laplacian).
    ///
    /// Output is a difference signal: constant regions map to the bias
    /// term (zero), discontinuities to non-zero magnitudes.
    pub fn edge_detect() -> Self {
        Self {
            weights: vec![
                0, -1, 0,
                -1, 4, -1,
                0, -1, 0,
            ],
            size: 3,
            divisor: 1,
            bias: 0,
        }
    }

    /// Returns the kernel radius (half the side length).
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Returns the weight at kernel position (kx, ky).
    #[inline]
    pub fn weight(&self, kx: u32, ky: u32) -> i32 {
        self.weights[(ky * self.size + kx) as usize]
    }

    /// Reduces an accumulated sum to a sample value.
    ///
    /// Applies the divisor (with round-to-nearest for non-negative sums),
    /// adds the bias, and clamps to `0..=255`. The GPU shader evaluates
    /// the identical expression in `i32`.
    #[inline]
    pub fn normalize(&self, sum: i32) -> u8 {
        ((sum + self.divisor / 2) / self.divisor + self.bias).clamp(0, MAX_SAMPLE) as u8
    }
}
