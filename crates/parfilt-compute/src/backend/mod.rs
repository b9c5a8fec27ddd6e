//! Compute backends for the accelerated convolution path.
//!
//! # Architecture
//!
//! ```text
//! ConvolveDispatcher<P: DevicePrimitives>
//!     +-- CpuBackend  (rayon parallelization)
//!     +-- WgpuBackend (Vulkan/Metal/DX12)
//! ```
//!
//! Both backends speak the same `DevicePrimitives` contract, so the
//! dispatcher times upload, compute, and download identically for each.

mod cpu_backend;
mod detect;
mod primitives;

#[cfg(feature = "wgpu")]
mod wgpu_backend;

pub use cpu_backend::{CpuBackend, CpuImage};
pub use detect::{BackendInfo, describe_backends, detect_backends, select_best_backend};
pub use primitives::{DeviceImage, DevicePrimitives};

#[cfg(feature = "wgpu")]
pub use wgpu_backend::{WgpuBackend, WgpuImage, WgpuKernel};

/// Available compute backends.
///
/// There is deliberately no auto variant here: a run executes on exactly
/// the backend the caller selected, and an accelerator that cannot be
/// opened surfaces as an error rather than a quiet substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// CPU backend using rayon for parallelization.
    Cpu,
    /// wgpu backend (Vulkan/Metal/DX12).
    Wgpu,
}

impl Backend {
    /// Check if this backend is available on the current system.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Cpu => true,
            #[cfg(feature = "wgpu")]
            Self::Wgpu => WgpuBackend::is_available(),
            #[cfg(not(feature = "wgpu"))]
            Self::Wgpu => false,
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Wgpu => "wgpu",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Self::Cpu),
            "wgpu" => Ok(Self::Wgpu),
            other => Err(format!("unknown backend '{other}' (expected cpu or wgpu)")),
        }
    }
}
