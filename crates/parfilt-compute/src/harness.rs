//! Sample-level comparison between the two filter paths.
//!
//! The accelerated output is checked against the sequential reference
//! after every comparison run. Divergence above the tolerance is reported
//! and logged as a warning; it never aborts the run, because the caller
//! still gets both outputs and the numbers to judge them by.

use std::fmt;

use tracing::warn;

use parfilt_core::{Error, PixelBuffer};

use crate::ComputeResult;

/// Maximum acceptable `max_abs_diff` between the two paths.
///
/// Both paths run the same i32 accumulation with the same truncating
/// normalize, so they are expected to agree exactly.
pub const DIVERGENCE_TOLERANCE: u8 = 0;

/// Sample-level difference statistics between two same-shape buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    /// Largest absolute per-sample difference.
    pub max_abs_diff: u8,
    /// Mean absolute difference over all samples.
    pub mean_abs_diff: f64,
    /// Number of samples that differ at all.
    pub differing_samples: usize,
    /// Number of samples compared.
    pub total_samples: usize,
}

impl Divergence {
    /// True when every sample matched exactly.
    pub fn is_exact(&self) -> bool {
        self.differing_samples == 0
    }

    /// True when `max_abs_diff` is at or below `tolerance`.
    pub fn within(&self, tolerance: u8) -> bool {
        self.max_abs_diff <= tolerance
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = if self.total_samples == 0 {
            0.0
        } else {
            100.0 * self.differing_samples as f64 / self.total_samples as f64
        };
        writeln!(f, "  max abs diff:      {}", self.max_abs_diff)?;
        writeln!(f, "  mean abs diff:     {:.6}", self.mean_abs_diff)?;
        write!(
            f,
            "  differing samples: {} / {} ({:.2}%)",
            self.differing_samples, self.total_samples, percent
        )
    }
}

/// Compare the accelerated output against the sequential reference.
///
/// # Errors
///
/// Returns an error if the two buffers do not share a shape; that means
/// one of the paths produced a malformed output, not that they diverged.
pub fn compare(reference: &PixelBuffer, candidate: &PixelBuffer) -> ComputeResult<Divergence> {
    if !reference.same_shape(candidate) {
        return Err(
            Error::buffer_size_mismatch(reference.sample_count(), candidate.sample_count()).into(),
        );
    }

    let mut max_abs_diff = 0u8;
    let mut sum: u64 = 0;
    let mut differing = 0usize;

    for (&r, &c) in reference.data().iter().zip(candidate.data()) {
        let diff = r.abs_diff(c);
        if diff > 0 {
            differing += 1;
            sum += diff as u64;
            max_abs_diff = max_abs_diff.max(diff);
        }
    }

    let total = reference.sample_count();
    let divergence = Divergence {
        max_abs_diff,
        mean_abs_diff: sum as f64 / total as f64,
        differing_samples: differing,
        total_samples: total,
    };

    if !divergence.within(DIVERGENCE_TOLERANCE) {
        warn!(
            max_abs_diff = divergence.max_abs_diff,
            differing_samples = divergence.differing_samples,
            total_samples = total,
            "numeric divergence between filter paths"
        );
    }

    Ok(divergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_buffers_are_exact() {
        let a = PixelBuffer::filled(8, 8, 3, 42).unwrap();
        let divergence = compare(&a, &a.clone()).unwrap();

        assert!(divergence.is_exact());
        assert!(divergence.within(DIVERGENCE_TOLERANCE));
        assert_eq!(divergence.max_abs_diff, 0);
        assert_eq!(divergence.mean_abs_diff, 0.0);
        assert_eq!(divergence.total_samples, 192);
    }

    #[test]
    fn test_known_differences_are_counted() {
        let a = PixelBuffer::filled(4, 1, 1, 100).unwrap();
        let mut b = a.clone();
        b.set_sample(1, 0, 0, 103); // +3
        b.set_sample(3, 0, 0, 93); // -7

        let divergence = compare(&a, &b).unwrap();
        assert_eq!(divergence.max_abs_diff, 7);
        assert_eq!(divergence.differing_samples, 2);
        assert_eq!(divergence.total_samples, 4);
        assert_relative_eq!(divergence.mean_abs_diff, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_tolerance_boundary() {
        let a = PixelBuffer::filled(2, 2, 1, 10).unwrap();
        let mut b = a.clone();
        b.set_sample(0, 0, 0, 11);

        let divergence = compare(&a, &b).unwrap();
        assert!(!divergence.within(0));
        assert!(divergence.within(1));
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let a = PixelBuffer::filled(4, 4, 1, 0).unwrap();
        let b = PixelBuffer::filled(4, 4, 3, 0).unwrap();
        assert!(compare(&a, &b).is_err());
    }

    #[test]
    fn test_display_summarizes_counts() {
        let a = PixelBuffer::filled(2, 1, 1, 0).unwrap();
        let mut b = a.clone();
        b.set_sample(0, 0, 0, 5);

        let text = compare(&a, &b).unwrap().to_string();
        assert!(text.contains("max abs diff:      5"));
        assert!(text.contains("1 / 2"));
        assert!(text.contains("50.00%"));
    }
}
