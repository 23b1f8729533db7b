//! Fixed-layout container header read/write.
//!
//! Both header shapes open with the image dimensions as two 4-byte
//! big-endian unsigned integers, width first:
//!
//! ```text
//! Legacy:  | width u32 BE | height u32 BE | layout tag, 4 ASCII bytes |
//! Stable:  | width u32 BE | height u32 BE |
//! ```
//!
//! The byte order and field order are load-bearing — files written by other
//! implementations of the format depend on them exactly.
//!
//! The shape is selected by a caller-supplied [`FormatVersion`]; nothing in
//! the byte stream says which version produced a file. That ambiguity is
//! inherited from the format itself (a legacy header for a 300×200 RGBA
//! image is byte-identical to a stable header followed by four payload
//! bytes), so this module does not guess — see DESIGN.md.

use thiserror::Error;

use crate::buffer::ChannelLayout;

/// Width + height fields, shared by both versions.
const DIMENSIONS_LEN: usize = 8;

/// Fixed width of the legacy ASCII layout tag. `"RGB"` is zero-padded.
const LAYOUT_TAG_LEN: usize = 4;

/// Which header shape a file carries.
///
/// Not self-describing: the caller must already know which version wrote a
/// file. New files should use [`FormatVersion::Stable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatVersion {
    /// Historical shape: dimensions followed by a 4-byte ASCII layout tag.
    Legacy,
    /// Current shape: dimensions only, layout fixed to RGBA.
    #[default]
    Stable,
}

impl FormatVersion {
    /// Total header length in bytes for this version.
    pub fn header_len(self) -> usize {
        match self {
            FormatVersion::Legacy => DIMENSIONS_LEN + LAYOUT_TAG_LEN,
            FormatVersion::Stable => DIMENSIONS_LEN,
        }
    }
}

/// Parsed header fields, before any structural validation.
///
/// `tag` is the legacy layout tag decoded best-effort: invalid bytes
/// replaced, trailing padding trimmed. Tag *content* never fails a read —
/// mapping it to a [`ChannelLayout`] (and rejecting tags the format does not
/// support) is the container's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    pub width: u32,
    pub height: u32,
    pub tag: Option<String>,
}

/// Fewer bytes than the selected version's header requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("need {needed} header bytes, found {found}")]
pub struct TruncatedHeader {
    pub needed: usize,
    pub found: usize,
}

/// Serialize a header for `version`.
///
/// The stable shape carries no layout field, so `layout` only affects the
/// output for [`FormatVersion::Legacy`].
pub fn write_header(width: u32, height: u32, layout: ChannelLayout, version: FormatVersion) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(version.header_len());
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    if version == FormatVersion::Legacy {
        let mut tag = [0u8; LAYOUT_TAG_LEN];
        tag[..layout.tag().len()].copy_from_slice(layout.tag().as_bytes());
        bytes.extend_from_slice(&tag);
    }
    bytes
}

/// Parse the leading header fields of `bytes` for `version`.
///
/// Consumes exactly [`FormatVersion::header_len`] bytes; the caller treats
/// everything after that as payload.
pub fn read_header(bytes: &[u8], version: FormatVersion) -> Result<RawHeader, TruncatedHeader> {
    let needed = version.header_len();
    if bytes.len() < needed {
        return Err(TruncatedHeader {
            needed,
            found: bytes.len(),
        });
    }

    let width = u32::from_be_bytes(bytes[0..4].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[4..8].try_into().unwrap());

    let tag = match version {
        FormatVersion::Stable => None,
        FormatVersion::Legacy => {
            let raw = &bytes[DIMENSIONS_LEN..DIMENSIONS_LEN + LAYOUT_TAG_LEN];
            let decoded = String::from_utf8_lossy(raw);
            Some(
                decoded
                    .trim_end_matches(['\0', ' '])
                    .trim_end()
                    .to_string(),
            )
        }
    };

    Ok(RawHeader { width, height, tag })
}
