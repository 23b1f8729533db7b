//! # ULIF
//!
//! Codec and CLI tools for the ULIF container: an uncompressed raster image
//! stored as a fixed-layout big-endian header followed by raw interleaved
//! pixel bytes. No compression, no color management, no chunking — the whole
//! point of the format is that the bytes on disk *are* the pixels, and the
//! only arithmetic that matters is `payload == width * height * channels`.
//!
//! # Architecture: Codec Core + Shell
//!
//! The codec is a narrow interface: hand it pixel bytes plus dimensions and
//! get a file; hand it a file and get validated pixel bytes plus dimensions
//! back. Everything around it — source-format decoding, resizing, report
//! text, the CLI — calls *into* that interface and never reaches past it:
//!
//! ```text
//! source image → import (normalize + shrink) → PixelBuffer → encode → .ulif
//! .ulif → decode → PixelBuffer → scale_for_display / export → preview
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`buffer`] | `PixelBuffer` + `ChannelLayout` value types and the length invariant |
//! | [`header`] | Fixed-layout header read/write, legacy vs. stable shapes |
//! | [`container`] | Whole-file encode/decode, extension policy, strict/permissive modes |
//! | [`resize`] | Pure dimension math: shrink-to-fit, display scaling, viewport fit |
//! | [`info`] | Human-readable reports: file-size formatting, megapixels, the info block |
//! | [`source`] | Import/export bridge to ordinary raster formats via the `image` crate |
//!
//! # Design Decisions
//!
//! ## Two Header Shapes, Caller-Selected
//!
//! The legacy header self-describes its channel layout with a 4-byte ASCII
//! tag; the stable header drops the tag and fixes RGBA. Nothing in the byte
//! stream says which shape a file uses, and the shapes are not mutually
//! distinguishable, so [`header::FormatVersion`] is an explicit parameter
//! (and a `--legacy` flag in the CLI) rather than a guess. This is an
//! inherited ambiguity of the format, documented rather than papered over.
//!
//! ## Strict by Default, Permissive by Choice
//!
//! Historical decoders built an image out of whatever payload bytes were
//! present even when the length disagreed with the header. Files in the wild
//! depend on that, so [`container::DecodeMode::Permissive`] reproduces it —
//! but it is silent corruption tolerance, so new code gets
//! [`container::DecodeMode::Strict`] unless it asks otherwise.
//!
//! ## Resize-Agnostic Codec
//!
//! Downscaling for storage and scaling for display are pure dimension
//! policies in [`resize`], applied by the caller before encode and after
//! decode. The codec never resizes; display rounding can therefore never
//! leak back into a stored container.
//!
//! ## Atomic Encode
//!
//! Encode writes through a named temp file in the destination directory and
//! persists it over the target, so a crash mid-write cannot leave a file
//! whose header promises more payload than exists.

pub mod buffer;
pub mod container;
pub mod header;
pub mod info;
pub mod resize;
pub mod source;
