//! Sequential reference convolution engine.
//!
//! Single-threaded, no suspension points: one pass over all output
//! samples in row-major order. This is the baseline the parallel paths
//! are compared against, so [`convolve_sample`] is public and the CPU
//! dispatch backend reuses it verbatim; only the iteration strategy may
//! differ between paths, never the per-sample arithmetic.

use parfilt_core::PixelBuffer;
use tracing::trace;

use crate::border::clamp_coord;
use crate::error::{FilterError, FilterResult};
use crate::kernel::Kernel;

/// Rejects kernels that do not fit the image.
///
/// # Errors
///
/// Returns [`FilterError::DimensionMismatch`] when the kernel side length
/// exceeds the image width or height.
pub fn check_dimensions(input: &PixelBuffer, kernel: &Kernel) -> FilterResult<()> {
    if kernel.size > input.width() || kernel.size > input.height() {
        return Err(FilterError::DimensionMismatch {
            kernel: kernel.size,
            width: input.width(),
            height: input.height(),
        });
    }
    Ok(())
}

/// Convolves a single output sample.
///
/// Accumulates the weighted K x K neighborhood of (x, y) for channel `c`
/// in `i32`, sampling with the replicate border, then normalizes through
/// [`Kernel::normalize`]. Reads only `input` and `kernel`; both parallel
/// paths compute exactly this value for every sample.
#[inline]
pub fn convolve_sample(input: &PixelBuffer, kernel: &Kernel, x: u32, y: u32, c: u32) -> u8 {
    let r = kernel.radius() as i64;
    let mut sum: i32 = 0;
    for ky in 0..kernel.size {
        let sy = clamp_coord(y as i64 + ky as i64 - r, input.height());
        for kx in 0..kernel.size {
            let sx = clamp_coord(x as i64 + kx as i64 - r, input.width());
            sum += kernel.weight(kx, ky) * input.sample(sx, sy, c) as i32;
        }
    }
    kernel.normalize(sum)
}

/// Applies a kernel to every pixel of `input` on the current thread.
///
/// Writes into a freshly allocated buffer of identical shape; the input
/// is never mutated.
///
/// # Errors
///
/// Returns [`FilterError::DimensionMismatch`] when the kernel is larger
/// than the image in either dimension. The check runs before the output
/// allocation, so no partial output exists on failure.
///
/// # Example
///
/// ```rust
/// use parfilt_core::PixelBuffer;
/// use parfilt_filters::{apply_sequential, Kernel};
///
/// let input = PixelBuffer::filled(4, 4, 1, 100).unwrap();
/// let output = apply_sequential(&input, &Kernel::box_blur()).unwrap();
/// assert!(output.data().iter().all(|&s| s == 100));
/// ```
pub fn apply_sequential(input: &PixelBuffer, kernel: &Kernel) -> FilterResult<PixelBuffer> {
    trace!(
        width = input.width(),
        height = input.height(),
        channels = input.channels(),
        kernel = kernel.size,
        "apply_sequential"
    );
    check_dimensions(input, kernel)?;

    let mut output = input.new_like();
    for y in 0..input.height() {
        for x in 0..input.width() {
            for c in 0..input.channels() {
                output.set_sample(x, y, c, convolve_sample(input, kernel, x, y, c));
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resolve;

    fn ramp_3x3() -> PixelBuffer {
        PixelBuffer::from_samples(3, 3, 1, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]).unwrap()
    }

    #[test]
    fn test_uniform_field_is_blur_fixed_point() {
        let input = PixelBuffer::filled(4, 4, 1, 100).unwrap();
        let output = apply_sequential(&input, &Kernel::box_blur()).unwrap();
        assert!(output.data().iter().all(|&s| s == 100));
    }

    #[test]
    fn test_uniform_field_edge_is_zero() {
        let input = PixelBuffer::filled(4, 4, 1, 100).unwrap();
        let output = apply_sequential(&input, &Kernel::edge_detect()).unwrap();
        assert!(output.data().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_uniform_field_sharpen_unchanged() {
        let input = PixelBuffer::filled(4, 4, 3, 77).unwrap();
        let output = apply_sequential(&input, &Kernel::sharpen()).unwrap();
        assert!(output.data().iter().all(|&s| s == 77));
    }

    #[test]
    fn test_blur_center_and_corner_values() {
        let output = apply_sequential(&ramp_3x3(), &Kernel::box_blur()).unwrap();
        // center: all nine samples once, sum 450, exactly 50
        assert_eq!(output.sample(1, 1, 0), 50);
        // corner (0,0) with replicate: 4*10 + 2*20 + 2*40 + 50 = 210 -> 23
        assert_eq!(output.sample(0, 0, 0), 23);
    }

    #[test]
    fn test_edge_on_linear_ramp() {
        let output = apply_sequential(&ramp_3x3(), &Kernel::edge_detect()).unwrap();
        // the Laplacian of a linear ramp vanishes away from borders
        assert_eq!(output.sample(1, 1, 0), 0);
        // corner sum is negative and clamps to zero
        assert_eq!(output.sample(0, 0, 0), 0);
    }

    #[test]
    fn test_sharpen_known_values() {
        let output = apply_sequential(&ramp_3x3(), &Kernel::sharpen()).unwrap();
        // 5*50 - 20 - 40 - 60 - 80 = 50: linear ramps pass through
        assert_eq!(output.sample(1, 1, 0), 50);
        // corner: 5*10 - 10 - 10 - 20 - 40 = -30 -> 0
        assert_eq!(output.sample(0, 0, 0), 0);
    }

    #[test]
    fn test_clamp_under_adversarial_contrast() {
        // 0/255 checker drives every kernel past both clamp rails
        let mut input = PixelBuffer::new(8, 8, 1).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                input.set_sample(x, y, 0, v);
            }
        }
        let sharpened = apply_sequential(&input, &resolve("sharpen").unwrap()).unwrap();
        // interior 0-pixel: 5*0 - 4*255 = -1020, clamps low
        assert_eq!(sharpened.sample(3, 3, 0), 0);
        // interior 255-pixel: 5*255 - 0 = 1275, clamps high
        assert_eq!(sharpened.sample(3, 4, 0), 255);

        let edges = apply_sequential(&input, &resolve("edge").unwrap()).unwrap();
        assert_eq!(edges.sample(3, 3, 0), 0);
        assert_eq!(edges.sample(3, 4, 0), 255);

        let blurred = apply_sequential(&input, &resolve("blur").unwrap()).unwrap();
        // four 255 neighbors in the cross: (4*255 + 4) / 9 = 113
        assert_eq!(blurred.sample(3, 3, 0), 113);
    }

    #[test]
    fn test_kernel_larger_than_image() {
        let input = PixelBuffer::filled(2, 2, 1, 10).unwrap();
        let kernel = Kernel::new(vec![1; 25], 5, 25, 0).unwrap();
        let err = apply_sequential(&input, &kernel).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_one_pixel_image_is_rejected_not_crashed() {
        let input = PixelBuffer::filled(1, 1, 1, 77).unwrap();
        let err = apply_sequential(&input, &Kernel::box_blur()).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_corner_pixels_use_only_replicated_samples() {
        // uniform field: replicate means corners see the same value nine
        // times, so all three filters give the interior result there too
        let input = PixelBuffer::filled(3, 3, 2, 200).unwrap();
        let blurred = apply_sequential(&input, &Kernel::box_blur()).unwrap();
        assert_eq!(blurred.sample(0, 0, 0), 200);
        assert_eq!(blurred.sample(2, 2, 1), 200);
        let edges = apply_sequential(&input, &Kernel::edge_detect()).unwrap();
        assert_eq!(edges.sample(0, 0, 0), 0);
        assert_eq!(edges.sample(2, 2, 1), 0);
    }

    #[test]
    fn test_channels_filter_independently() {
        let mut input = PixelBuffer::filled(4, 4, 2, 0).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                input.set_sample(x, y, 1, 100);
            }
        }
        let output = apply_sequential(&input, &Kernel::box_blur()).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(output.sample(x, y, 0), 0);
                assert_eq!(output.sample(x, y, 1), 100);
            }
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let input = ramp_3x3();
        let a = apply_sequential(&input, &Kernel::sharpen()).unwrap();
        let b = apply_sequential(&input, &Kernel::sharpen()).unwrap();
        assert_eq!(a, b);
    }
}
