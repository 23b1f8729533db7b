//! Source-image import and preview export via the `image` crate.
//!
//! This is the bridge between arbitrary raster formats and the codec's
//! [`PixelBuffer`]: import decodes a source file, applies the caller's
//! shrink bound through [`resize::shrink_to_fit`], and normalizes to
//! interleaved RGBA; export turns a decoded buffer back into a PNG for
//! viewing. The container codec itself never sees a foreign format.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image` crate (pure Rust decoders) |
//! | Downscale | `image::imageops::resize` with `Lanczos3` filter |
//! | Normalize | `DynamicImage::to_rgba8` |
//! | Export | `image::RgbaImage` / `RgbImage` → PNG |

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage, RgbaImage};
use thiserror::Error;

use crate::buffer::{ChannelLayout, PixelBuffer};
use crate::resize;

/// Extensions whose decoders are compiled in.
pub const SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp", "bmp"];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("failed to export {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
    #[error("buffer length disagrees with its dimensions; nothing exportable")]
    MalformedBuffer,
}

/// Whether `path` looks like a decodable source image.
pub fn is_source_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Decode a source image, shrink it to `max_dimension`, and normalize to an
/// RGBA [`PixelBuffer`] ready for encoding.
///
/// The shrink bound is applied here, before the buffer ever reaches the
/// codec — the codec stays resize-agnostic. Images already inside the bound
/// pass through at their native size.
pub fn import(path: &Path, max_dimension: u32) -> Result<PixelBuffer, SourceError> {
    let decoded = ImageReader::open(path)?
        .decode()
        .map_err(|e| SourceError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_w, target_h) = resize::shrink_to_fit(width, height, max_dimension);

    let fitted = if (target_w, target_h) == (width, height) {
        decoded
    } else {
        DynamicImage::ImageRgba8(image::imageops::resize(
            &decoded,
            target_w,
            target_h,
            FilterType::Lanczos3,
        ))
    };

    let rgba = fitted.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer {
        width,
        height,
        layout: ChannelLayout::Rgba,
        pixels: rgba.into_raw(),
    })
}

/// Write a decoded buffer to `dest` as a PNG.
///
/// Fails with [`SourceError::MalformedBuffer`] when the buffer's length
/// invariant does not hold (e.g. a permissively decoded, truncated file) —
/// there is no honest image to write in that case.
pub fn export_png(buffer: &PixelBuffer, dest: &Path) -> Result<(), SourceError> {
    if !buffer.len_matches() {
        return Err(SourceError::MalformedBuffer);
    }

    let dynamic = match buffer.layout {
        ChannelLayout::Rgba => {
            RgbaImage::from_raw(buffer.width, buffer.height, buffer.pixels.clone())
                .map(DynamicImage::ImageRgba8)
        }
        ChannelLayout::Rgb => {
            RgbImage::from_raw(buffer.width, buffer.height, buffer.pixels.clone())
                .map(DynamicImage::ImageRgb8)
        }
    }
    .ok_or(SourceError::MalformedBuffer)?;

    dynamic
        .save_with_format(dest, image::ImageFormat::Png)
        .map_err(|e| SourceError::Encode {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })
}
