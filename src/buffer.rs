//! Pixel buffer value types shared by the encode and decode paths.
//!
//! A [`PixelBuffer`] is an owned, dimensioned run of interleaved channel
//! bytes plus a [`ChannelLayout`] tag. It performs no I/O — the container
//! module serializes it, the source module produces it from decoded images.
//!
//! The core invariant of the whole format lives here:
//!
//! ```text
//! pixels.len() == width * height * channel_count(layout)
//! ```
//!
//! Any violation of that equality is corruption, not a warning. Decoding in
//! permissive mode is the single sanctioned way to hold a buffer that breaks
//! it (see [`container`](crate::container)).

use serde::Serialize;

/// Per-pixel byte arrangement. Non-premultiplied, no gamma metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelLayout {
    /// 3 bytes per pixel: red, green, blue.
    Rgb,
    /// 4 bytes per pixel: red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Interleaved bytes per pixel (3 or 4).
    pub fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    /// Descriptive bit-depth label: 24 for RGB, 32 for RGBA.
    pub fn bit_depth(self) -> u32 {
        self.channel_count() as u32 * 8
    }

    /// ASCII tag written into legacy headers.
    pub fn tag(self) -> &'static str {
        match self {
            ChannelLayout::Rgb => "RGB",
            ChannelLayout::Rgba => "RGBA",
        }
    }

    /// Map a (trimmed) legacy header tag back to a layout.
    ///
    /// Returns `None` for tags the format does not support; the container
    /// turns that into a typed decode error.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "RGB" => Some(ChannelLayout::Rgb),
            "RGBA" => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }
}

/// An owned raster image: dimensions, channel layout, and row-major
/// interleaved pixel bytes.
///
/// Plain value type — whoever constructs or decodes one owns it exclusively
/// until it is handed to the next stage (encode or display). `width == 0 or
/// height == 0` is a degenerate-but-legal empty image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Construct a buffer, checking the length invariant.
    ///
    /// Returns `None` when `pixels.len()` disagrees with
    /// `width * height * channel_count`. Callers that need to hold a
    /// mismatched buffer (permissive decode) build the struct directly.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, pixels: Vec<u8>) -> Option<Self> {
        let buffer = Self {
            width,
            height,
            layout,
            pixels,
        };
        buffer.len_matches().then_some(buffer)
    }

    /// Payload length the dimensions declare, in bytes.
    ///
    /// Computed in u64 so implausible headers cannot overflow on the way to
    /// being rejected. The pixel count always fits u64; the channel multiply
    /// saturates, which lands far above any plausibility cap.
    pub fn expected_len(width: u32, height: u32, layout: ChannelLayout) -> u64 {
        (width as u64 * height as u64).saturating_mul(layout.channel_count() as u64)
    }

    /// Whether the length invariant holds for this buffer.
    pub fn len_matches(&self) -> bool {
        self.pixels.len() as u64 == Self::expected_len(self.width, self.height, self.layout)
    }

    /// True for zero-area images (`width == 0 || height == 0`).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_counts() {
        assert_eq!(ChannelLayout::Rgb.channel_count(), 3);
        assert_eq!(ChannelLayout::Rgba.channel_count(), 4);
    }

    #[test]
    fn bit_depth_labels() {
        assert_eq!(ChannelLayout::Rgb.bit_depth(), 24);
        assert_eq!(ChannelLayout::Rgba.bit_depth(), 32);
    }

    #[test]
    fn tag_round_trips() {
        for layout in [ChannelLayout::Rgb, ChannelLayout::Rgba] {
            assert_eq!(ChannelLayout::from_tag(layout.tag()), Some(layout));
        }
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(ChannelLayout::from_tag("P"), None);
        assert_eq!(ChannelLayout::from_tag("L"), None);
        assert_eq!(ChannelLayout::from_tag(""), None);
    }

    #[test]
    fn new_enforces_length_invariant() {
        assert!(PixelBuffer::new(2, 2, ChannelLayout::Rgba, vec![0; 16]).is_some());
        assert!(PixelBuffer::new(2, 2, ChannelLayout::Rgba, vec![0; 15]).is_none());
        assert!(PixelBuffer::new(2, 2, ChannelLayout::Rgb, vec![0; 12]).is_some());
    }

    #[test]
    fn zero_dimension_buffer_is_legal() {
        let buffer = PixelBuffer::new(0, 0, ChannelLayout::Rgba, Vec::new()).unwrap();
        assert!(buffer.is_degenerate());
        assert!(buffer.len_matches());
    }

    #[test]
    fn expected_len_does_not_overflow() {
        // The worst-case RGBA payload exceeds u64; it must saturate, not wrap.
        let len = PixelBuffer::expected_len(u32::MAX, u32::MAX, ChannelLayout::Rgba);
        assert_eq!(len, u64::MAX);

        assert_eq!(
            PixelBuffer::expected_len(4096, 4096, ChannelLayout::Rgba),
            4096 * 4096 * 4
        );
    }
}
