//! End-to-end filter runs: resolve, dispatch, reference, compare.
//!
//! The pipeline resolves the filter name first, so an unknown name fails
//! before any device work starts. The accelerated output is always the
//! result handed back; the sequential reference exists to time the
//! baseline and to check the accelerated path against.

use std::time::Instant;

use tracing::debug;

use parfilt_core::PixelBuffer;
use parfilt_filters::{apply_sequential, resolve};

use crate::backend::Backend;
use crate::dispatch::{AnyDispatcher, create_dispatcher};
use crate::harness::{self, Divergence};
use crate::timing::TimingRecord;
use crate::ComputeResult;

/// Result of one pipeline run.
///
/// The caller owns every buffer in here; the pipeline keeps nothing
/// after returning.
#[derive(Debug)]
pub struct FilterRun {
    /// Accelerated output, freshly allocated, same shape as the input.
    pub output: PixelBuffer,
    /// Sequential reference output, when a reference run was made.
    pub reference: Option<PixelBuffer>,
    /// Stage times; `sequential` is set when a reference run was made.
    pub timing: TimingRecord,
    /// Path comparison, when a reference run was made.
    pub divergence: Option<Divergence>,
}

/// Runs named filters on one backend, with an optional reference pass.
pub struct FilterPipeline {
    dispatcher: AnyDispatcher,
    backend: Backend,
}

impl FilterPipeline {
    /// Open the selected backend.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComputeError::AcceleratorUnavailable`] when the
    /// backend cannot be opened. Nothing falls back silently.
    pub fn new(backend: Backend) -> ComputeResult<Self> {
        Ok(Self {
            dispatcher: create_dispatcher(backend)?,
            backend,
        })
    }

    /// The backend this pipeline runs on.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Run the accelerated path only.
    pub fn run(&self, input: &PixelBuffer, filter: &str) -> ComputeResult<FilterRun> {
        let kernel = resolve(filter)?;
        debug!(filter, backend = self.dispatcher.name(), "filter run");

        let dispatched = self.dispatcher.apply(input, &kernel)?;
        Ok(FilterRun {
            output: dispatched.output,
            reference: None,
            timing: dispatched.timing,
            divergence: None,
        })
    }

    /// Run both paths and compare them sample by sample.
    ///
    /// The sequential reference is timed as its own single stage, after
    /// the accelerated stages, on the same input.
    pub fn run_compared(&self, input: &PixelBuffer, filter: &str) -> ComputeResult<FilterRun> {
        let kernel = resolve(filter)?;
        debug!(
            filter,
            backend = self.dispatcher.name(),
            "filter run with reference"
        );

        let dispatched = self.dispatcher.apply(input, &kernel)?;

        let started = Instant::now();
        let reference = apply_sequential(input, &kernel)?;
        let sequential = started.elapsed();

        let divergence = harness::compare(&reference, &dispatched.output)?;

        let timing = TimingRecord {
            sequential: Some(sequential),
            ..dispatched.timing
        };

        Ok(FilterRun {
            output: dispatched.output,
            reference: Some(reference),
            timing,
            divergence: Some(divergence),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::DIVERGENCE_TOLERANCE;
    use crate::ComputeError;
    use parfilt_filters::{FilterError, Kernel};

    fn checker_image() -> PixelBuffer {
        let mut buf = PixelBuffer::new(12, 10, 3).unwrap();
        for y in 0..10 {
            for x in 0..12 {
                let v = if (x + y) % 2 == 0 { 30 } else { 220 };
                for c in 0..3 {
                    buf.set_sample(x, y, c, v);
                }
            }
        }
        buf
    }

    #[test]
    fn test_run_matches_reference() {
        let pipeline = FilterPipeline::new(Backend::Cpu).unwrap();
        let input = checker_image();

        let run = pipeline.run(&input, "blur").unwrap();
        let reference = apply_sequential(&input, &Kernel::box_blur()).unwrap();
        assert_eq!(run.output, reference);
        assert!(run.reference.is_none());
        assert!(run.divergence.is_none());
        assert!(run.timing.sequential.is_none());
    }

    #[test]
    fn test_run_compared_is_exact_on_cpu() {
        let pipeline = FilterPipeline::new(Backend::Cpu).unwrap();
        let input = checker_image();

        let run = pipeline.run_compared(&input, "sharpen").unwrap();
        let divergence = run.divergence.unwrap();
        assert!(divergence.is_exact());
        assert!(divergence.within(DIVERGENCE_TOLERANCE));
        assert!(run.timing.sequential.is_some());
        assert_eq!(run.reference.unwrap(), run.output);
    }

    #[test]
    fn test_unknown_filter_fails_before_dispatch() {
        let pipeline = FilterPipeline::new(Backend::Cpu).unwrap();
        let input = checker_image();

        let err = pipeline.run(&input, "gaussian_unknown").unwrap_err();
        match err {
            ComputeError::Filter(inner) => assert!(inner.is_unknown_filter()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_kernel_larger_than_image_is_rejected() {
        let pipeline = FilterPipeline::new(Backend::Cpu).unwrap();
        let input = PixelBuffer::filled(2, 2, 3, 128).unwrap();

        let err = pipeline.run(&input, "blur").unwrap_err();
        assert!(matches!(
            err,
            ComputeError::Filter(FilterError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_repeated_runs_are_deterministic() {
        let pipeline = FilterPipeline::new(Backend::Cpu).unwrap();
        let input = checker_image();

        let first = pipeline.run(&input, "edge").unwrap();
        let second = pipeline.run(&input, "edge").unwrap();
        assert_eq!(first.output, second.output);
    }
}
