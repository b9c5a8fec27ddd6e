//! Device primitives abstraction for unified backend implementation.

use parfilt_core::PixelBuffer;
use parfilt_filters::Kernel;

use crate::ComputeResult;

/// Handle to an image in device memory.
pub trait DeviceImage: Send + Sync {
    /// Image dimensions (width, height, channels).
    fn dimensions(&self) -> (u32, u32, u32);

    /// Width.
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    /// Height.
    fn height(&self) -> u32 {
        self.dimensions().1
    }

    /// Channel count.
    fn channels(&self) -> u32 {
        self.dimensions().2
    }

    /// Number of u8 samples.
    fn sample_count(&self) -> u64 {
        let (w, h, c) = self.dimensions();
        (w as u64) * (h as u64) * (c as u64)
    }

    /// Size in bytes of device memory used.
    ///
    /// One byte per sample; backends that pad for alignment override this.
    fn size_bytes(&self) -> u64 {
        self.sample_count()
    }
}

/// Core device operations abstraction.
///
/// Every method is synchronous: when it returns, the operation has fully
/// completed on the device. Backends that submit asynchronous work block
/// on it internally, so the dispatcher can time each stage with a plain
/// wall clock and trust the numbers.
pub trait DevicePrimitives: Send + Sync {
    /// Backend-specific image handle type.
    type Image: DeviceImage;

    /// Backend-specific resident kernel type.
    type Kernel: Send + Sync;

    /// Upload image data to the device.
    fn upload(&self, input: &PixelBuffer) -> ComputeResult<Self::Image>;

    /// Upload kernel weights and parameters to the device.
    fn upload_kernel(&self, kernel: &Kernel) -> ComputeResult<Self::Kernel>;

    /// Allocate an output image on the device.
    fn allocate(&self, width: u32, height: u32, channels: u32) -> ComputeResult<Self::Image>;

    /// Execute the convolution kernel over `src`, writing into `dst`.
    ///
    /// `src` and `dst` must have identical dimensions; output is always
    /// written to the separate `dst` image, never in place.
    fn convolve(
        &self,
        src: &Self::Image,
        dst: &mut Self::Image,
        kernel: &Self::Kernel,
    ) -> ComputeResult<()>;

    /// Download image data from the device.
    fn download(&self, image: &Self::Image) -> ComputeResult<PixelBuffer>;

    /// Backend name.
    fn name(&self) -> &'static str;
}
