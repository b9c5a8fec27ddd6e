//! Procedural test-image generators.
//!
//! This module builds deterministic [`PixelBuffer`]s for tests, benches, and
//! the CLI `samples` command:
//! - [`gradient`] - linear two-color ramp
//! - [`checker`] - two-color checkerboard
//! - [`noise`] - hash-based per-sample noise
//! - [`scene`] - banded landscape-like composite (gradient + noise + shapes)
//!
//! Everything is a pure function of its arguments; the same seed always
//! produces the same buffer. Randomness comes from an FNV-1a-style
//! coordinate hash rather than an RNG so no state is threaded through.

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Direction of a [`gradient`] ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Colors interpolate left to right.
    Horizontal,
    /// Colors interpolate top to bottom.
    Vertical,
}

/// Creates a linear gradient between two colors.
///
/// `from` and `to` supply per-channel values; when shorter than the channel
/// count the last value repeats (so `&[80]` grays out all channels).
///
/// # Example
///
/// ```rust
/// use parfilt_core::pattern::{gradient, Orientation};
///
/// let buf = gradient(64, 64, 3, &[30, 60, 120], &[200, 220, 255], Orientation::Vertical).unwrap();
/// assert_eq!(buf.sample(0, 0, 2), 120);
/// ```
pub fn gradient(
    width: u32,
    height: u32,
    channels: u32,
    from: &[u8],
    to: &[u8],
    orientation: Orientation,
) -> Result<PixelBuffer> {
    let mut buf = PixelBuffer::new(width, height, channels)?;
    let span = match orientation {
        Orientation::Horizontal => width,
        Orientation::Vertical => height,
    };
    for y in 0..height {
        for x in 0..width {
            let along = match orientation {
                Orientation::Horizontal => x,
                Orientation::Vertical => y,
            };
            let t = if span > 1 {
                along as f32 / (span - 1) as f32
            } else {
                0.0
            };
            for c in 0..channels {
                let a = channel_value(from, c);
                let b = channel_value(to, c);
                let v = a as f32 + (b as f32 - a as f32) * t;
                buf.set_sample(x, y, c, v.round().clamp(0.0, 255.0) as u8);
            }
        }
    }
    Ok(buf)
}

/// Creates a two-color checkerboard with square cells of `cell` pixels.
///
/// A `cell` of 0 is treated as 1.
pub fn checker(
    width: u32,
    height: u32,
    channels: u32,
    cell: u32,
    a: &[u8],
    b: &[u8],
) -> Result<PixelBuffer> {
    let cell = cell.max(1);
    let mut buf = PixelBuffer::new(width, height, channels)?;
    for y in 0..height {
        for x in 0..width {
            let odd = ((x / cell) + (y / cell)) % 2 == 1;
            let color = if odd { b } else { a };
            for c in 0..channels {
                buf.set_sample(x, y, c, channel_value(color, c));
            }
        }
    }
    Ok(buf)
}

/// Creates uniform per-sample noise over the full 0..=255 range.
pub fn noise(width: u32, height: u32, channels: u32, seed: u32) -> Result<PixelBuffer> {
    let mut buf = PixelBuffer::new(width, height, channels)?;
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                buf.set_sample(x, y, c, hash_byte(seed, x, y, c));
            }
        }
    }
    Ok(buf)
}

/// Creates a banded landscape-like composite image.
///
/// Top third is a vertical sky gradient, the middle band is dark with heavy
/// speckle, the bottom band is mid-toned with lighter speckle, and a few
/// seed-placed rectangles sit on top. Exercises smooth regions, texture,
/// and hard edges in one buffer, which is what the convolution filters
/// need to show visible differences.
pub fn scene(width: u32, height: u32, channels: u32, seed: u32) -> Result<PixelBuffer> {
    let mut buf = gradient(
        width,
        height,
        channels,
        &[180, 150, 120],
        &[90, 90, 110],
        Orientation::Vertical,
    )?;

    let band = height / 3;
    for y in band..height {
        let (base, jitter): (u8, i32) = if y < 2 * band { (80, 20) } else { (110, 12) };
        for x in 0..width {
            for c in 0..channels {
                let offset = hash_byte(seed, x, y, c) as i32 % (2 * jitter + 1) - jitter;
                let v = (base as i32 - 10 * c as i32 + offset).clamp(0, 255) as u8;
                buf.set_sample(x, y, c, v);
            }
        }
    }

    // a handful of hard-edged rectangles for the edge filter to find
    for i in 0..4u32 {
        let h = hash_coords(seed.wrapping_add(i), 31, 17, 7);
        let rx = h % width;
        let ry = (h >> 8) % height;
        let rw = (width / 8).max(1);
        let rh = (height / 10).max(1);
        let shade = 40 + ((h >> 16) % 180) as u8;
        for y in ry..(ry + rh).min(height) {
            for x in rx..(rx + rw).min(width) {
                for c in 0..channels {
                    buf.set_sample(x, y, c, shade.saturating_add((c * 8) as u8));
                }
            }
        }
    }
    Ok(buf)
}

/// Expands a short color slice to the requested channel (last value repeats).
fn channel_value(values: &[u8], c: u32) -> u8 {
    values
        .get(c as usize)
        .copied()
        .unwrap_or_else(|| values.last().copied().unwrap_or(0))
}

/// FNV-1a-style coordinate hash.
fn hash_coords(seed: u32, x: u32, y: u32, c: u32) -> u32 {
    let mut h = seed.wrapping_add(0x811c9dc5);
    h = h.wrapping_mul(0x01000193) ^ x;
    h = h.wrapping_mul(0x01000193) ^ y;
    h = h.wrapping_mul(0x01000193) ^ c;
    h
}

/// Hash reduced to a byte; the high bits are the best-mixed.
fn hash_byte(seed: u32, x: u32, y: u32, c: u32) -> u8 {
    (hash_coords(seed, x, y, c) >> 24) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let buf = gradient(16, 16, 3, &[0, 10, 20], &[255, 245, 235], Orientation::Horizontal)
            .unwrap();
        assert_eq!(buf.pixel(0, 5), &[0, 10, 20]);
        assert_eq!(buf.pixel(15, 5), &[255, 245, 235]);
    }

    #[test]
    fn test_gradient_single_column_uses_start() {
        let buf = gradient(1, 8, 1, &[7], &[200], Orientation::Horizontal).unwrap();
        assert!(buf.data().iter().all(|&s| s == 7));
    }

    #[test]
    fn test_checker_alternates() {
        let buf = checker(8, 8, 1, 2, &[0], &[255]).unwrap();
        assert_eq!(buf.sample(0, 0, 0), 0);
        assert_eq!(buf.sample(2, 0, 0), 255);
        assert_eq!(buf.sample(2, 2, 0), 0);
        assert_eq!(buf.sample(0, 2, 0), 255);
    }

    #[test]
    fn test_checker_short_color_repeats() {
        let buf = checker(4, 4, 3, 1, &[10], &[250]).unwrap();
        assert_eq!(buf.pixel(0, 0), &[10, 10, 10]);
        assert_eq!(buf.pixel(1, 0), &[250, 250, 250]);
    }

    #[test]
    fn test_noise_deterministic() {
        let a = noise(32, 32, 3, 42).unwrap();
        let b = noise(32, 32, 3, 42).unwrap();
        assert_eq!(a, b);
        let c = noise(32, 32, 3, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_scene_deterministic_and_shaped() {
        let a = scene(64, 48, 3, 7).unwrap();
        let b = scene(64, 48, 3, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimensions(), (64, 48, 3));
    }

    #[test]
    fn test_scene_single_channel() {
        let buf = scene(16, 16, 1, 1).unwrap();
        assert_eq!(buf.sample_count(), 256);
    }
}
