//! Whole-file ULIF encode and decode.
//!
//! A container is a [`header`](crate::header) followed by the raw pixel
//! payload, verbatim — no checksum, no compression, no trailing metadata.
//! Every encode rewrites the destination in full; every decode reads the
//! file in full and discards it. Calls share no state, so the codec is
//! reentrant and safe to drive from worker threads; serializing access to a
//! single *path* is the caller's job.
//!
//! ## Strict vs. permissive decoding
//!
//! The payload length must equal `width * height * channels`. Historical
//! decoders tolerated files that break this and built an image from whatever
//! bytes were present; some existing files only open under that rule. The
//! [`DecodeMode`] flag keeps both behaviors: [`DecodeMode::Strict`] (the
//! default) reports the mismatch as [`DecodeError::SizeMismatch`],
//! [`DecodeMode::Permissive`] reproduces the legacy tolerance.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::buffer::{ChannelLayout, PixelBuffer};
use crate::header::{self, FormatVersion, TruncatedHeader};

/// The one recognized container extension, matched case-insensitively.
pub const CONTAINER_EXTENSION: &str = "ulif";

/// Largest payload a header may declare before it is rejected as
/// implausible, in bytes. Headers are validated in u64, so this cap is also
/// the allocation bound for decode.
pub const MAX_PAYLOAD_LEN: u64 = 4 * 1024 * 1024 * 1024;

/// Decode policy for payload-length/header disagreements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Mismatches are fatal ([`DecodeError::SizeMismatch`]).
    #[default]
    Strict,
    /// Legacy tolerance: build the buffer from whatever bytes are present.
    /// Short payloads are kept at their truncated length; overlong payloads
    /// are cut to the declared length.
    Permissive,
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nothing to encode: {width}x{height} image with no pixel data")]
    EmptyBuffer { width: u32, height: u32 },
    #[error("stable containers store RGBA only; {0:?} needs the legacy tagged header")]
    LayoutMismatch(ChannelLayout),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported extension: {} (expected .ulif)", .0.display())]
    UnsupportedExtension(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated header: {0}")]
    TruncatedHeader(#[from] TruncatedHeader),
    #[error("invalid header: {width}x{height} declares an implausible {expected}-byte payload")]
    InvalidHeader { width: u32, height: u32, expected: u64 },
    #[error("unknown channel layout tag {0:?}")]
    UnknownLayout(String),
    #[error("payload size mismatch: header declares {expected} bytes, file carries {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
}

/// Serialize a buffer to container bytes: header, then payload, one pass.
pub fn encode_bytes(buffer: &PixelBuffer, version: FormatVersion) -> Result<Vec<u8>, EncodeError> {
    if buffer.pixels.is_empty() && !buffer.is_degenerate() {
        return Err(EncodeError::EmptyBuffer {
            width: buffer.width,
            height: buffer.height,
        });
    }
    // The stable header has nowhere to record a non-RGBA layout; encoding
    // one would decode as garbage later. Refuse up front.
    if version == FormatVersion::Stable && buffer.layout != ChannelLayout::Rgba {
        return Err(EncodeError::LayoutMismatch(buffer.layout));
    }

    let mut bytes = header::write_header(buffer.width, buffer.height, buffer.layout, version);
    bytes.reserve(buffer.pixels.len());
    bytes.extend_from_slice(&buffer.pixels);
    Ok(bytes)
}

/// Encode a buffer to `dest`, creating or overwriting it in full.
///
/// Writes through a named temp file in the destination directory and
/// atomically persists it, so a failure mid-encode never leaves a file whose
/// size disagrees with its header.
pub fn encode(buffer: &PixelBuffer, version: FormatVersion, dest: &Path) -> Result<(), EncodeError> {
    let bytes = encode_bytes(buffer, version)?;

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.persist(dest).map_err(|e| EncodeError::Io(e.error))?;
    Ok(())
}

/// Decode container bytes into a validated pixel buffer.
pub fn decode_bytes(
    bytes: &[u8],
    version: FormatVersion,
    mode: DecodeMode,
) -> Result<PixelBuffer, DecodeError> {
    let raw = header::read_header(bytes, version)?;
    let layout = resolve_layout(version, &raw)?;

    let expected = PixelBuffer::expected_len(raw.width, raw.height, layout);
    if expected > MAX_PAYLOAD_LEN {
        return Err(DecodeError::InvalidHeader {
            width: raw.width,
            height: raw.height,
            expected,
        });
    }

    let payload = &bytes[version.header_len()..];
    let pixels = match mode {
        DecodeMode::Strict => {
            if payload.len() as u64 != expected {
                return Err(DecodeError::SizeMismatch {
                    expected,
                    actual: payload.len() as u64,
                });
            }
            payload.to_vec()
        }
        DecodeMode::Permissive => {
            let keep = payload.len().min(expected as usize);
            payload[..keep].to_vec()
        }
    };

    Ok(PixelBuffer {
        width: raw.width,
        height: raw.height,
        layout,
        pixels,
    })
}

/// Decode the container at `path`.
///
/// The extension policy runs first: a path without the `.ulif` suffix is
/// rejected before any byte is read (content is never sniffed).
pub fn decode(path: &Path, version: FormatVersion, mode: DecodeMode) -> Result<PixelBuffer, DecodeError> {
    ensure_container_extension(path)?;
    let bytes = fs::read(path)?;
    decode_bytes(&bytes, version, mode)
}

/// Whether `path` carries the recognized container extension
/// (case-insensitive, suffix only).
pub fn has_container_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CONTAINER_EXTENSION))
}

/// Resolve the channel layout a parsed header implies.
///
/// Stable headers fix RGBA; legacy headers carry a tag, which may name a
/// layout the format does not support.
pub(crate) fn resolve_layout(
    version: FormatVersion,
    raw: &header::RawHeader,
) -> Result<ChannelLayout, DecodeError> {
    match (version, &raw.tag) {
        (FormatVersion::Stable, _) => Ok(ChannelLayout::Rgba),
        (FormatVersion::Legacy, Some(tag)) => {
            ChannelLayout::from_tag(tag).ok_or_else(|| DecodeError::UnknownLayout(tag.clone()))
        }
        // read_header always yields a tag for legacy input.
        (FormatVersion::Legacy, None) => unreachable!("legacy header read without tag"),
    }
}

pub(crate) fn ensure_container_extension(path: &Path) -> Result<(), DecodeError> {
    if has_container_extension(path) {
        Ok(())
    } else {
        Err(DecodeError::UnsupportedExtension(path.to_path_buf()))
    }
}
