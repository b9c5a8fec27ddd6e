//! Dual-path convolution engine.
//!
//! Runs every filter on two independent paths: an accelerator backend
//! (wgpu compute shader or rayon CPU) and a single-threaded sequential
//! reference, then compares the outputs sample by sample.
//!
//! # Architecture
//!
//! ```text
//! FilterPipeline (accelerated run + sequential reference + comparison)
//!     └── ConvolveDispatcher<P: DevicePrimitives>
//!             ├── CpuBackend  (rayon row parallelism)
//!             └── WgpuBackend (WGSL compute shader)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use parfilt_compute::{FilterPipeline, Backend};
//! use parfilt_core::PixelBuffer;
//!
//! let pipeline = FilterPipeline::new(Backend::Cpu)?;
//! let input = PixelBuffer::filled(640, 480, 3, 128)?;
//!
//! let run = pipeline.run(&input, "blur")?;
//! println!("{}", run.timing);
//! ```

pub mod backend;
pub mod dispatch;
pub mod harness;
pub mod pipeline;
mod shaders;
pub mod timing;

pub use backend::{
    Backend, BackendInfo, CpuBackend, DeviceImage, DevicePrimitives, describe_backends,
    detect_backends, select_best_backend,
};
#[cfg(feature = "wgpu")]
pub use backend::{WgpuBackend, WgpuImage};
pub use dispatch::{AnyDispatcher, ConvolveDispatcher, DispatchOutput, create_dispatcher};
pub use harness::{Divergence, DIVERGENCE_TOLERANCE};
pub use pipeline::{FilterPipeline, FilterRun};
pub use timing::TimingRecord;

use thiserror::Error;

/// Convolution engine errors.
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("Accelerator unavailable: {0}")]
    AcceleratorUnavailable(String),

    #[error("Failed to create device: {0}")]
    DeviceCreation(String),

    #[error("Failed to create buffer: {0}")]
    BufferCreation(String),

    #[error("Failed to compile shader: {0}")]
    ShaderCompilation(String),

    #[error("Accelerator operation failed: {0}")]
    OperationFailed(String),

    #[error(transparent)]
    Filter(#[from] parfilt_filters::FilterError),

    #[error(transparent)]
    Core(#[from] parfilt_core::Error),
}

impl ComputeError {
    /// True for errors reporting that no accelerator could be opened.
    pub fn is_accelerator_unavailable(&self) -> bool {
        matches!(self, Self::AcceleratorUnavailable(_))
    }
}

pub type ComputeResult<T> = Result<T, ComputeError>;
