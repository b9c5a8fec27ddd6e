//! wgpu backend running the convolution as a compute shader.
//!
//! Samples live in storage buffers packed four u8 values per u32 word
//! (see [`crate::shaders`]). Device and pipeline are created once at
//! backend construction; upload, convolve, and download each block until
//! the device has finished, so the caller's wall-clock timing of a stage
//! covers exactly that stage.

use std::sync::mpsc;

use tracing::{debug, trace};
use wgpu::util::DeviceExt;

use parfilt_core::PixelBuffer;
use parfilt_filters::Kernel;

use crate::shaders;
use crate::{ComputeError, ComputeResult};

use super::primitives::{DeviceImage, DevicePrimitives};

/// Must match `@workgroup_size` in [`shaders::CONVOLVE`].
const WORKGROUP_SIZE: u32 = 256;

/// Image resident in GPU memory as a packed-word storage buffer.
pub struct WgpuImage {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    channels: u32,
}

impl WgpuImage {
    /// Number of u32 words holding the packed samples.
    fn word_count(&self) -> u32 {
        (self.sample_count().div_ceil(4)) as u32
    }

    /// Buffer size in bytes, padded to whole words.
    fn padded_bytes(&self) -> u64 {
        self.word_count() as u64 * 4
    }
}

impl DeviceImage for WgpuImage {
    fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }

    fn size_bytes(&self) -> u64 {
        self.padded_bytes()
    }
}

/// Kernel resident in GPU memory: a params uniform plus a weight buffer.
pub struct WgpuKernel {
    params: wgpu::Buffer,
    weights: wgpu::Buffer,
}

/// wgpu compute backend.
#[derive(Debug)]
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    adapter_name: String,
}

impl WgpuBackend {
    /// Open the highest-priority adapter on the primary backends.
    pub fn new() -> ComputeResult<Self> {
        Self::with_backends(wgpu::Backends::PRIMARY)
    }

    /// Open an adapter restricted to the given instance backends.
    ///
    /// `wgpu::Backends::empty()` enumerates no adapters, which makes the
    /// unavailable path testable on any machine.
    pub fn with_backends(backends: wgpu::Backends) -> ComputeResult<Self> {
        pollster::block_on(Self::init(backends))
    }

    /// True if an adapter can be opened on this machine.
    pub fn is_available() -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
            .is_some()
    }

    /// Name of the adapter backing this device.
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    async fn init(backends: wgpu::Backends) -> ComputeResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .ok_or_else(|| {
                ComputeError::AcceleratorUnavailable("no suitable GPU adapter found".to_string())
            })?;

        let info = adapter.get_info();
        debug!(adapter = %info.name, backend = ?info.backend, "opening wgpu device");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("parfilt"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ComputeError::DeviceCreation(e.to_string()))?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("convolve"),
            source: wgpu::ShaderSource::Wgsl(shaders::CONVOLVE.into()),
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("convolve"),
            layout: None,
            module: &module,
            entry_point: Some("main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(ComputeError::ShaderCompilation(err.to_string()));
        }

        Ok(Self {
            device,
            queue,
            pipeline,
            adapter_name: info.name,
        })
    }

    fn check_buffer_size(&self, bytes: u64) -> ComputeResult<()> {
        let limit = self.device.limits().max_storage_buffer_binding_size as u64;
        if bytes > limit {
            return Err(ComputeError::BufferCreation(format!(
                "image needs {bytes} bytes, device limit is {limit}"
            )));
        }
        Ok(())
    }

    /// Block until all submitted work has completed on the device.
    fn wait(&self) {
        let _ = self.device.poll(wgpu::Maintain::Wait);
    }
}

impl DevicePrimitives for WgpuBackend {
    type Image = WgpuImage;
    type Kernel = WgpuKernel;

    fn upload(&self, input: &PixelBuffer) -> ComputeResult<Self::Image> {
        let (width, height, channels) = input.dimensions();
        let padded = (input.sample_count() as u64).div_ceil(4) * 4;
        self.check_buffer_size(padded)?;

        // create_buffer_init pads to word alignment and zero-fills the tail.
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("convolve src"),
                contents: input.data(),
                usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            });

        // Empty submit flushes the mapped-at-creation write so the transfer
        // lands inside this stage, not the next one.
        self.queue.submit([]);
        self.wait();

        Ok(WgpuImage {
            buffer,
            width,
            height,
            channels,
        })
    }

    fn upload_kernel(&self, kernel: &Kernel) -> ComputeResult<Self::Kernel> {
        let params: [i32; 4] = [kernel.size as i32, kernel.divisor, kernel.bias, 0];
        let params = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("kernel params"),
                contents: bytemuck::cast_slice(&params),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let weights = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("kernel weights"),
                contents: bytemuck::cast_slice(&kernel.weights),
                usage: wgpu::BufferUsages::STORAGE,
            });

        self.queue.submit([]);
        self.wait();

        Ok(WgpuKernel { params, weights })
    }

    fn allocate(&self, width: u32, height: u32, channels: u32) -> ComputeResult<Self::Image> {
        let samples = (width as u64) * (height as u64) * (channels as u64);
        let padded = samples.div_ceil(4) * 4;
        self.check_buffer_size(padded)?;

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("convolve dst"),
            size: padded,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        Ok(WgpuImage {
            buffer,
            width,
            height,
            channels,
        })
    }

    fn convolve(
        &self,
        src: &Self::Image,
        dst: &mut Self::Image,
        kernel: &Self::Kernel,
    ) -> ComputeResult<()> {
        debug_assert!(src.dimensions() == dst.dimensions());

        let total = src.sample_count() as u32;
        let dims: [u32; 4] = [src.width, src.height, src.channels, total];
        let dims = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("convolve dims"),
                contents: bytemuck::cast_slice(&dims),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("convolve"),
            layout: &self.pipeline.get_bind_group_layout(0),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: src.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: dst.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: dims.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: kernel.params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: kernel.weights.as_entire_binding(),
                },
            ],
        });

        let groups = src.word_count().div_ceil(WORKGROUP_SIZE);
        let max = self.device.limits().max_compute_workgroups_per_dimension;
        if groups > max {
            return Err(ComputeError::OperationFailed(format!(
                "dispatch of {groups} workgroups exceeds device limit {max}"
            )));
        }
        trace!(words = src.word_count(), groups, "dispatching convolve");

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("convolve"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("convolve"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(groups, 1, 1);
        }
        self.queue.submit(Some(encoder.finish()));
        self.wait();

        Ok(())
    }

    fn download(&self, image: &Self::Image) -> ComputeResult<PixelBuffer> {
        let padded = image.padded_bytes();
        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("convolve staging"),
            size: padded,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("download"),
            });
        encoder.copy_buffer_to_buffer(&image.buffer, 0, &staging, 0, padded);
        self.queue.submit(Some(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.wait();

        receiver
            .recv()
            .map_err(|_| ComputeError::OperationFailed("map callback dropped".to_string()))?
            .map_err(|e| ComputeError::OperationFailed(format!("buffer map failed: {e}")))?;

        let samples = {
            let view = slice.get_mapped_range();
            view[..image.sample_count() as usize].to_vec()
        };
        staging.unmap();

        let buffer = PixelBuffer::from_samples(image.width, image.height, image.channels, samples)?;
        Ok(buffer)
    }

    fn name(&self) -> &'static str {
        "wgpu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parfilt_filters::apply_sequential;

    #[test]
    fn test_empty_backends_report_unavailable() {
        let err = WgpuBackend::with_backends(wgpu::Backends::empty()).unwrap_err();
        assert!(err.is_accelerator_unavailable());
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_gpu_round_trip_preserves_samples() {
        let data: Vec<u8> = (0..97).map(|i| (i * 13 % 256) as u8).collect();
        let input = PixelBuffer::from_samples(97, 1, 1, data).unwrap();

        let backend = WgpuBackend::new().unwrap();
        let image = backend.upload(&input).unwrap();
        let back = backend.download(&image).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_gpu_blur_matches_sequential() {
        let data: Vec<u8> = (0..31 * 17 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let input = PixelBuffer::from_samples(31, 17, 3, data).unwrap();
        let kernel = Kernel::box_blur();

        let backend = WgpuBackend::new().unwrap();
        let src = backend.upload(&input).unwrap();
        let dev_kernel = backend.upload_kernel(&kernel).unwrap();
        let mut dst = backend.allocate(31, 17, 3).unwrap();
        backend.convolve(&src, &mut dst, &dev_kernel).unwrap();
        let gpu = backend.download(&dst).unwrap();

        let cpu = apply_sequential(&input, &kernel).unwrap();
        assert_eq!(gpu, cpu);
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_gpu_edge_on_uniform_is_zero() {
        let input = PixelBuffer::filled(16, 16, 1, 100).unwrap();
        let kernel = Kernel::edge_detect();

        let backend = WgpuBackend::new().unwrap();
        let src = backend.upload(&input).unwrap();
        let dev_kernel = backend.upload_kernel(&kernel).unwrap();
        let mut dst = backend.allocate(16, 16, 1).unwrap();
        backend.convolve(&src, &mut dst, &dev_kernel).unwrap();
        let gpu = backend.download(&dst).unwrap();

        assert!(gpu.data().iter().all(|&s| s == 0));
    }
}
