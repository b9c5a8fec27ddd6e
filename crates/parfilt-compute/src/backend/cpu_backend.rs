//! CPU backend using rayon for parallelization.

use rayon::prelude::*;

use parfilt_core::PixelBuffer;
use parfilt_filters::{Kernel, convolve_sample};

use super::primitives::{DeviceImage, DevicePrimitives};
use crate::ComputeResult;

/// CPU image handle. "Device memory" is plain RAM.
pub struct CpuImage {
    buffer: PixelBuffer,
}

impl CpuImage {
    pub fn new(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}

impl DeviceImage for CpuImage {
    fn dimensions(&self) -> (u32, u32, u32) {
        self.buffer.dimensions()
    }
}

/// CPU primitives implementation.
///
/// Rows are distributed across the rayon pool; each sample is produced by
/// the same accumulation routine the sequential reference uses, so the two
/// paths agree bit for bit.
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevicePrimitives for CpuBackend {
    type Image = CpuImage;
    type Kernel = Kernel;

    fn upload(&self, input: &PixelBuffer) -> ComputeResult<Self::Image> {
        Ok(CpuImage::new(input.clone()))
    }

    fn upload_kernel(&self, kernel: &Kernel) -> ComputeResult<Self::Kernel> {
        Ok(kernel.clone())
    }

    fn allocate(&self, width: u32, height: u32, channels: u32) -> ComputeResult<Self::Image> {
        Ok(CpuImage::new(PixelBuffer::new(width, height, channels)?))
    }

    fn convolve(
        &self,
        src: &Self::Image,
        dst: &mut Self::Image,
        kernel: &Self::Kernel,
    ) -> ComputeResult<()> {
        debug_assert!(src.buffer.same_shape(&dst.buffer));

        let (width, _, channels) = src.dimensions();
        let row_samples = (width * channels) as usize;
        let input = &src.buffer;

        dst.buffer
            .data_mut()
            .par_chunks_mut(row_samples)
            .enumerate()
            .for_each(|(y, row)| {
                let y = y as u32;
                for x in 0..width {
                    for c in 0..channels {
                        row[(x * channels + c) as usize] = convolve_sample(input, kernel, x, y, c);
                    }
                }
            });

        Ok(())
    }

    fn download(&self, image: &Self::Image) -> ComputeResult<PixelBuffer> {
        Ok(image.buffer.clone())
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parfilt_filters::apply_sequential;

    fn ramp(width: u32, height: u32) -> PixelBuffer {
        let data: Vec<u8> = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        PixelBuffer::from_samples(width, height, 1, data).unwrap()
    }

    #[test]
    fn test_cpu_convolve_matches_sequential() {
        let input = ramp(16, 12);
        let kernel = Kernel::box_blur();
        let backend = CpuBackend::new();

        let src = backend.upload(&input).unwrap();
        let dev_kernel = backend.upload_kernel(&kernel).unwrap();
        let mut dst = backend.allocate(16, 12, 1).unwrap();
        backend.convolve(&src, &mut dst, &dev_kernel).unwrap();
        let parallel = backend.download(&dst).unwrap();

        let sequential = apply_sequential(&input, &kernel).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_cpu_upload_download_round_trip() {
        let input = ramp(5, 3);
        let backend = CpuBackend::new();

        let image = backend.upload(&input).unwrap();
        assert_eq!(image.dimensions(), (5, 3, 1));
        assert_eq!(image.sample_count(), 15);

        let back = backend.download(&image).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_cpu_convolve_multichannel() {
        let data: Vec<u8> = (0..8 * 6 * 3).map(|i| (i * 11 % 256) as u8).collect();
        let input = PixelBuffer::from_samples(8, 6, 3, data).unwrap();
        let kernel = Kernel::sharpen();
        let backend = CpuBackend::new();

        let src = backend.upload(&input).unwrap();
        let dev_kernel = backend.upload_kernel(&kernel).unwrap();
        let mut dst = backend.allocate(8, 6, 3).unwrap();
        backend.convolve(&src, &mut dst, &dev_kernel).unwrap();

        let parallel = backend.download(&dst).unwrap();
        let sequential = apply_sequential(&input, &kernel).unwrap();
        assert_eq!(parallel, sequential);
    }
}
