//! Backend detection and reporting.
//!
//! Detection is diagnostic only. Filter runs use exactly the backend the
//! caller names; an unavailable accelerator is an error, never a silent
//! switch to another backend.

use super::Backend;

/// Information about a compute backend.
#[derive(Debug, Clone)]
pub struct BackendInfo {
    /// Backend type.
    pub backend: Backend,
    /// Human-readable name.
    pub name: &'static str,
    /// Whether backend is available.
    pub available: bool,
    /// Priority for reporting order (higher = preferred).
    pub priority: u32,
    /// Description.
    pub description: &'static str,
}

/// Detect all known backends and their availability.
pub fn detect_backends() -> Vec<BackendInfo> {
    let mut backends = vec![BackendInfo {
        backend: Backend::Cpu,
        name: "cpu",
        available: true,
        priority: 10,
        description: "CPU with rayon parallelization",
    }];

    #[cfg(feature = "wgpu")]
    {
        let wgpu_available = super::WgpuBackend::is_available();
        backends.push(BackendInfo {
            backend: Backend::Wgpu,
            name: "wgpu",
            available: wgpu_available,
            priority: if wgpu_available { 100 } else { 0 },
            description: "GPU via wgpu (Vulkan/Metal/DX12)",
        });
    }

    #[cfg(not(feature = "wgpu"))]
    backends.push(BackendInfo {
        backend: Backend::Wgpu,
        name: "wgpu",
        available: false,
        priority: 0,
        description: "GPU via wgpu (not compiled in)",
    });

    backends.sort_by(|a, b| b.priority.cmp(&a.priority));
    backends
}

/// Select the most capable available backend.
pub fn select_best_backend() -> Backend {
    let backends = detect_backends();

    backends
        .into_iter()
        .filter(|b| b.available)
        .max_by_key(|b| b.priority)
        .map(|b| b.backend)
        .unwrap_or(Backend::Cpu)
}

/// Get description of available backends.
pub fn describe_backends() -> String {
    let backends = detect_backends();
    let mut desc = String::new();

    for info in backends {
        let status = if info.available { "+" } else { "-" };
        desc.push_str(&format!("[{}] {}: {}\n", status, info.name, info.description));
    }

    desc
}
