//! In-memory pixel buffer shared by every filtering path.
//!
//! # Overview
//!
//! [`PixelBuffer`] owns a flat, row-major array of 8-bit samples plus the
//! width/height/channel metadata that gives it shape. It carries no
//! filtering behavior of its own; the sequential engine, the parallel
//! dispatch backends, and the I/O layer all exchange this one type.
//!
//! # Layout
//!
//! Samples are interleaved: the sample for pixel (x, y) channel c lives at
//! index `(y * width + x) * channels + c`. The constructors guarantee the
//! backing array length equals exactly `width * height * channels`, so any
//! index produced from in-range coordinates is in range.
//!
//! # Example
//!
//! ```rust
//! use parfilt_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::new(4, 4, 3).unwrap();
//! buf.set_sample(1, 2, 0, 200);
//! assert_eq!(buf.sample(1, 2, 0), 200);
//! assert_eq!(buf.dimensions(), (4, 4, 3));
//! ```

use crate::error::{Error, Result};

/// Owned raster image: `width * height * channels` interleaved u8 samples.
///
/// Buffers handed to a filtering pass are treated as immutable; passes
/// allocate a fresh output buffer of identical shape rather than writing
/// in place, so concurrent reads never observe partial writes.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Raw interleaved sample data.
    data: Vec<u8>,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Samples per pixel (1, 3, or 4 in practice).
    channels: u32,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any dimension is zero or the
    /// total sample count would overflow `usize`.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        let expected = Self::sample_count_for(width, height, channels)?;
        Ok(Self {
            data: vec![0; expected],
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer filled with a single sample value.
    ///
    /// # Errors
    ///
    /// Same dimension validation as [`PixelBuffer::new`].
    pub fn filled(width: u32, height: u32, channels: u32, value: u8) -> Result<Self> {
        let expected = Self::sample_count_for(width, height, channels)?;
        Ok(Self {
            data: vec![value; expected],
            width,
            height,
            channels,
        })
    }

    /// Creates a buffer from existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` does not equal
    /// `width * height * channels`, or [`Error::InvalidDimensions`] when the
    /// shape itself is unusable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use parfilt_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_samples(2, 2, 1, vec![0, 64, 128, 255]).unwrap();
    /// assert_eq!(buf.sample(1, 1, 0), 255);
    /// ```
    pub fn from_samples(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::sample_count_for(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::buffer_size_mismatch(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a zero-filled buffer with the same shape as `self`.
    ///
    /// Infallible: the shape was validated when `self` was built. This is
    /// what filtering passes use to allocate their output.
    pub fn new_like(&self) -> Self {
        Self {
            data: vec![0; self.data.len()],
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    fn sample_count_for(width: u32, height: u32, channels: u32) -> Result<usize> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                channels,
                "all dimensions must be non-zero",
            ));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or_else(|| {
                Error::invalid_dimensions(width, height, channels, "sample count overflows usize")
            })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Returns (width, height, channels).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }

    /// Returns the total number of samples (`width * height * channels`).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the size of the sample data in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Returns the raw interleaved sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw sample data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning the sample data.
    #[inline]
    pub fn into_samples(self) -> Vec<u8> {
        self.data
    }

    /// Returns the flat index of sample (x, y, c).
    #[inline]
    pub fn sample_index(&self, x: u32, y: u32, c: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize + c as usize
    }

    /// Returns the sample at (x, y, c).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the coordinates are out of bounds.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, c: u32) -> u8 {
        debug_assert!(
            x < self.width && y < self.height && c < self.channels,
            "sample out of bounds"
        );
        self.data[self.sample_index(x, y, c)]
    }

    /// Returns the sample at (x, y, c), or an error when out of bounds.
    pub fn try_sample(&self, x: u32, y: u32, c: u32) -> Result<u8> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return Err(Error::OutOfBounds {
                x,
                y,
                channel: c,
                width: self.width,
                height: self.height,
                channels: self.channels,
            });
        }
        Ok(self.data[self.sample_index(x, y, c)])
    }

    /// Writes the sample at (x, y, c).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the coordinates are out of bounds.
    #[inline]
    pub fn set_sample(&mut self, x: u32, y: u32, c: u32, value: u8) {
        debug_assert!(
            x < self.width && y < self.height && c < self.channels,
            "sample out of bounds"
        );
        let idx = self.sample_index(x, y, c);
        self.data[idx] = value;
    }

    /// Returns the `channels` samples of pixel (x, y) as a slice.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let start = self.sample_index(x, y, 0);
        &self.data[start..start + self.channels as usize]
    }

    /// Returns `true` if `other` has the same width, height, and channels.
    #[inline]
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
