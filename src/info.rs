//! Human-readable container reports.
//!
//! Everything here is derived, never persisted: the report is computed from
//! the decoded header plus a `stat`-style file size, and the payload is
//! never read. The text block keeps the shape users of the original tool
//! know:
//!
//! ```text
//! Format: ULIF
//! Mode: RGBA
//! Dimensions: 300 x 200 pixels
//! Resolution: 0.06 MP
//! File Size: 234.41 KB
//! Bit Depth: 32 bits
//! ```

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::buffer::ChannelLayout;
use crate::container::{self, DecodeError};
use crate::header::{self, FormatVersion};

/// Render a byte count as a human-readable magnitude string.
///
/// 1024-based thresholds: below 1 KiB the integer count with a `bytes`
/// suffix, below 1 MiB a two-decimal `KB` value, otherwise a two-decimal
/// `MB` value. Total function, no failure mode.
///
/// # Examples
/// ```
/// # use ulif::info::format_file_size;
/// assert_eq!(format_file_size(512), "512 bytes");
/// assert_eq!(format_file_size(2048), "2.00 KB");
/// assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Pixel count in megapixels (`width * height / 10^6`).
pub fn megapixels(width: u32, height: u32) -> f64 {
    width as f64 * height as f64 / 1_000_000.0
}

/// Descriptive report for one container file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerInfo {
    /// Always `"ULIF"`.
    pub format: &'static str,
    /// Channel layout ("mode" in the original tool's wording).
    pub mode: ChannelLayout,
    pub width: u32,
    pub height: u32,
    pub megapixels: f64,
    pub bit_depth: u32,
    pub file_size_bytes: u64,
    /// `file_size_bytes` through [`format_file_size`].
    pub file_size: String,
}

impl ContainerInfo {
    fn new(width: u32, height: u32, layout: ChannelLayout, file_size_bytes: u64) -> Self {
        Self {
            format: "ULIF",
            mode: layout,
            width,
            height,
            megapixels: megapixels(width, height),
            bit_depth: layout.bit_depth(),
            file_size_bytes,
            file_size: format_file_size(file_size_bytes),
        }
    }
}

impl fmt::Display for ContainerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Mode: {}", self.mode.tag())?;
        writeln!(f, "Dimensions: {} x {} pixels", self.width, self.height)?;
        writeln!(f, "Resolution: {:.2} MP", self.megapixels)?;
        writeln!(f, "File Size: {}", self.file_size)?;
        write!(f, "Bit Depth: {} bits", self.bit_depth)
    }
}

/// Build a [`ContainerInfo`] from the header of the container at `path`.
///
/// Reads only the header bytes; the pixel payload is never touched, so this
/// works (and reports honestly) even on files whose payload a strict decode
/// would reject.
pub fn read_info(path: &Path, version: FormatVersion) -> Result<ContainerInfo, DecodeError> {
    container::ensure_container_extension(path)?;

    let mut file = fs::File::open(path)?;
    let mut head = Vec::with_capacity(version.header_len());
    file.by_ref()
        .take(version.header_len() as u64)
        .read_to_end(&mut head)?;

    let raw = header::read_header(&head, version)?;
    let layout = container::resolve_layout(version, &raw)?;
    let file_size = file.metadata()?.len();

    Ok(ContainerInfo::new(raw.width, raw.height, layout, file_size))
}
