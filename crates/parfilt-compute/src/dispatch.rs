//! Staged execution of one convolution on one backend.
//!
//! The dispatcher owns a [`DevicePrimitives`] implementation and runs the
//! three stages in order, clocking each one: upload (image, kernel, and
//! output allocation), compute (the kernel itself), download (result back
//! to host memory). Validation happens before the clock starts.

use std::time::Instant;

use tracing::debug;

use parfilt_core::PixelBuffer;
use parfilt_filters::{Kernel, check_dimensions};

use crate::backend::{Backend, CpuBackend, DevicePrimitives};
#[cfg(feature = "wgpu")]
use crate::backend::WgpuBackend;
use crate::timing::TimingRecord;
use crate::ComputeResult;
#[cfg(not(feature = "wgpu"))]
use crate::ComputeError;

/// Result of one dispatched convolution.
#[derive(Debug)]
pub struct DispatchOutput {
    /// Freshly allocated output, same shape as the input.
    pub output: PixelBuffer,
    /// Per-stage wall-clock times. `sequential` is unset here.
    pub timing: TimingRecord,
}

/// Runs convolutions on a single backend with per-stage timing.
pub struct ConvolveDispatcher<P: DevicePrimitives> {
    primitives: P,
}

impl<P: DevicePrimitives> ConvolveDispatcher<P> {
    pub fn new(primitives: P) -> Self {
        Self { primitives }
    }

    /// Backend name.
    pub fn name(&self) -> &'static str {
        self.primitives.name()
    }

    /// Borrow the underlying primitives.
    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    /// Convolve `input` with `kernel`, timing each stage.
    ///
    /// # Errors
    ///
    /// Returns [`parfilt_filters::FilterError::DimensionMismatch`] (wrapped)
    /// when the kernel does not fit the image, or a backend error when a
    /// device operation fails.
    pub fn apply(&self, input: &PixelBuffer, kernel: &Kernel) -> ComputeResult<DispatchOutput> {
        check_dimensions(input, kernel)?;
        let (width, height, channels) = input.dimensions();

        let started = Instant::now();
        let src = self.primitives.upload(input)?;
        let device_kernel = self.primitives.upload_kernel(kernel)?;
        let mut dst = self.primitives.allocate(width, height, channels)?;
        let upload = started.elapsed();

        let started = Instant::now();
        self.primitives.convolve(&src, &mut dst, &device_kernel)?;
        let compute = started.elapsed();

        let started = Instant::now();
        let output = self.primitives.download(&dst)?;
        let download = started.elapsed();

        debug!(
            backend = self.name(),
            upload_us = upload.as_micros() as u64,
            compute_us = compute.as_micros() as u64,
            download_us = download.as_micros() as u64,
            "convolve dispatched"
        );

        Ok(DispatchOutput {
            output,
            timing: TimingRecord {
                upload,
                compute,
                download,
                sequential: None,
            },
        })
    }
}

/// Dispatcher over any backend, for callers that pick one at runtime.
pub enum AnyDispatcher {
    Cpu(ConvolveDispatcher<CpuBackend>),
    #[cfg(feature = "wgpu")]
    Wgpu(ConvolveDispatcher<WgpuBackend>),
}

impl AnyDispatcher {
    /// Backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu(d) => d.name(),
            #[cfg(feature = "wgpu")]
            Self::Wgpu(d) => d.name(),
        }
    }

    /// Convolve on whichever backend this dispatcher wraps.
    pub fn apply(&self, input: &PixelBuffer, kernel: &Kernel) -> ComputeResult<DispatchOutput> {
        match self {
            Self::Cpu(d) => d.apply(input, kernel),
            #[cfg(feature = "wgpu")]
            Self::Wgpu(d) => d.apply(input, kernel),
        }
    }
}

/// Create a dispatcher for the selected backend.
///
/// # Errors
///
/// Returns [`crate::ComputeError::AcceleratorUnavailable`] when the wgpu
/// backend is selected but no adapter can be opened (or the feature is
/// compiled out). There is no fallback to another backend.
pub fn create_dispatcher(backend: Backend) -> ComputeResult<AnyDispatcher> {
    match backend {
        Backend::Cpu => Ok(AnyDispatcher::Cpu(ConvolveDispatcher::new(
            CpuBackend::new(),
        ))),
        Backend::Wgpu => {
            #[cfg(feature = "wgpu")]
            {
                Ok(AnyDispatcher::Wgpu(ConvolveDispatcher::new(
                    WgpuBackend::new()?,
                )))
            }
            #[cfg(not(feature = "wgpu"))]
            {
                Err(ComputeError::AcceleratorUnavailable(
                    "wgpu feature not enabled".to_string(),
                ))
            }
        }
    }
}
