//! CLI command implementations

pub mod backends;
pub mod filter;
pub mod samples;

use anyhow::{Context, Result, bail};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use parfilt_core::PixelBuffer;
use std::path::Path;

/// Load an 8-bit image into a pixel buffer (C = 1, 2, 3 or 4).
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let decoded =
        image::open(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let buffer = match decoded {
        DynamicImage::ImageLuma8(img) => {
            PixelBuffer::from_samples(img.width(), img.height(), 1, img.into_raw())
        }
        DynamicImage::ImageLumaA8(img) => {
            PixelBuffer::from_samples(img.width(), img.height(), 2, img.into_raw())
        }
        DynamicImage::ImageRgb8(img) => {
            PixelBuffer::from_samples(img.width(), img.height(), 3, img.into_raw())
        }
        DynamicImage::ImageRgba8(img) => {
            PixelBuffer::from_samples(img.width(), img.height(), 4, img.into_raw())
        }
        // 16-bit and float inputs are flattened to 8-bit RGB.
        other => {
            let img = other.to_rgb8();
            PixelBuffer::from_samples(img.width(), img.height(), 3, img.into_raw())
        }
    };
    buffer.with_context(|| format!("Decoded image has inconsistent shape: {}", path.display()))
}

/// Save a pixel buffer as PNG or JPEG, chosen by file extension.
pub fn save_image(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let (width, height, channels) = buffer.dimensions();
    let data = buffer.data().to_vec();
    let encoded = match channels {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        n => bail!("Cannot encode a {n}-channel image: {}", path.display()),
    };
    let encoded = encoded.context("Pixel data does not match its dimensions")?;
    encoded
        .save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
