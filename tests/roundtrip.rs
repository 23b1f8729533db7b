//! On-disk round-trip tests for the container codec.
//!
//! Everything here goes through real files in a temp directory — the unit
//! tests in `src/container.rs` cover the byte-level codec, this suite covers
//! the path policy, atomic writes, and whole-file behavior.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use ulif::buffer::{ChannelLayout, PixelBuffer};
use ulif::container::{self, DecodeError, DecodeMode};
use ulif::header::FormatVersion;
use ulif::info;

fn gradient(width: u32, height: u32, layout: ChannelLayout) -> PixelBuffer {
    let len = PixelBuffer::expected_len(width, height, layout) as usize;
    let pixels = (0..len).map(|i| (i * 7 % 256) as u8).collect();
    PixelBuffer::new(width, height, layout, pixels).unwrap()
}

#[test]
fn file_round_trip_stable() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("photo.ulif");

    let buffer = gradient(640, 480, ChannelLayout::Rgba);
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();

    let decoded = container::decode(&path, FormatVersion::Stable, DecodeMode::Strict).unwrap();
    assert_eq!(decoded, buffer);
}

#[test]
fn file_round_trip_legacy() {
    let tmp = TempDir::new().unwrap();

    for layout in [ChannelLayout::Rgb, ChannelLayout::Rgba] {
        let path = tmp.path().join(format!("{}.ulif", layout.tag()));
        let buffer = gradient(33, 21, layout);
        container::encode(&buffer, FormatVersion::Legacy, &path).unwrap();

        let decoded = container::decode(&path, FormatVersion::Legacy, DecodeMode::Strict).unwrap();
        assert_eq!(decoded, buffer);
    }
}

#[test]
fn on_disk_size_is_header_plus_payload() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sized.ulif");

    let buffer = gradient(300, 200, ChannelLayout::Rgba);
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 8 + 300 * 200 * 4);

    // First 8 bytes are the big-endian dimensions, exactly.
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &[0, 0, 1, 44, 0, 0, 0, 200]);
}

#[test]
fn encode_overwrites_destination_in_full() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("reused.ulif");

    container::encode(&gradient(64, 64, ChannelLayout::Rgba), FormatVersion::Stable, &path)
        .unwrap();
    let large = fs::metadata(&path).unwrap().len();

    // Re-encoding something smaller must fully replace the file, never
    // leave stale trailing bytes from the bigger predecessor.
    container::encode(&gradient(2, 2, ChannelLayout::Rgba), FormatVersion::Stable, &path).unwrap();
    let small = fs::metadata(&path).unwrap().len();
    assert_eq!(small, 8 + 2 * 2 * 4);
    assert!(small < large);

    let decoded = container::decode(&path, FormatVersion::Stable, DecodeMode::Strict).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 2));
}

#[test]
fn extension_policy_ignores_content() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("actually-a-container.png");

    // A perfectly valid container under the wrong name is still rejected,
    // before any byte is read.
    let buffer = gradient(4, 4, ChannelLayout::Rgba);
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();

    let err = container::decode(&path, FormatVersion::Stable, DecodeMode::Strict).unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedExtension(_)));
}

#[test]
fn extension_is_case_insensitive_on_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("SHOUTING.ULIF");

    let buffer = gradient(5, 5, ChannelLayout::Rgba);
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();

    let decoded = container::decode(&path, FormatVersion::Stable, DecodeMode::Strict).unwrap();
    assert_eq!(decoded, buffer);
}

#[test]
fn missing_container_surfaces_io_error() {
    let err = container::decode(
        Path::new("/nonexistent/gone.ulif"),
        FormatVersion::Stable,
        DecodeMode::Strict,
    )
    .unwrap_err();
    assert!(matches!(err, DecodeError::Io(_)));
}

#[test]
fn crafted_truncated_file_strict_vs_permissive() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("truncated.ulif");

    let buffer = gradient(10, 10, ChannelLayout::Rgba);
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();

    // Chop 25 payload bytes off, as a crash mid-write would have.
    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 25);
    fs::write(&path, &bytes).unwrap();

    let err = container::decode(&path, FormatVersion::Stable, DecodeMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::SizeMismatch { expected: 400, actual: 375 }
    ));

    let decoded = container::decode(&path, FormatVersion::Stable, DecodeMode::Permissive).unwrap();
    assert_eq!(decoded.pixels.len(), 375);
    assert_eq!((decoded.width, decoded.height), (10, 10));
}

#[test]
fn empty_image_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.ulif");

    let buffer = PixelBuffer::new(0, 0, ChannelLayout::Rgba, Vec::new()).unwrap();
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 8);

    let decoded = container::decode(&path, FormatVersion::Stable, DecodeMode::Strict).unwrap();
    assert!(decoded.is_degenerate());

    let report = info::read_info(&path, FormatVersion::Stable).unwrap();
    assert_eq!((report.width, report.height), (0, 0));
    assert_eq!(report.megapixels, 0.0);
    assert_eq!(report.file_size, "8 bytes");
}

#[test]
fn header_only_file_decodes_but_truncated_header_fails() {
    let tmp = TempDir::new().unwrap();

    // 8 bytes of zeros: a valid stable 0x0 container...
    let zero = tmp.path().join("zero.ulif");
    fs::write(&zero, [0u8; 8]).unwrap();
    assert!(container::decode(&zero, FormatVersion::Stable, DecodeMode::Strict).is_ok());

    // ...but not enough for a legacy header.
    let err = container::decode(&zero, FormatVersion::Legacy, DecodeMode::Strict).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedHeader(_)));

    let stub = tmp.path().join("stub.ulif");
    fs::write(&stub, [0u8; 3]).unwrap();
    let err = container::decode(&stub, FormatVersion::Stable, DecodeMode::Strict).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedHeader(_)));
}

#[test]
fn info_reports_header_without_reading_payload() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("report.ulif");

    let buffer = gradient(1020, 510, ChannelLayout::Rgba);
    container::encode(&buffer, FormatVersion::Stable, &path).unwrap();

    let report = info::read_info(&path, FormatVersion::Stable).unwrap();
    assert_eq!(report.format, "ULIF");
    assert_eq!(report.mode, ChannelLayout::Rgba);
    assert_eq!((report.width, report.height), (1020, 510));
    assert_eq!(report.bit_depth, 32);
    assert_eq!(report.file_size_bytes, 8 + 1020 * 510 * 4);

    // A payload-corrupt file still reports: info never validates payload.
    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(100);
    fs::write(&path, &bytes).unwrap();
    let report = info::read_info(&path, FormatVersion::Stable).unwrap();
    assert_eq!((report.width, report.height), (1020, 510));
    assert_eq!(report.file_size_bytes, 100);
}

#[test]
fn legacy_info_reads_the_tag() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tagged.ulif");

    let buffer = gradient(12, 8, ChannelLayout::Rgb);
    container::encode(&buffer, FormatVersion::Legacy, &path).unwrap();

    let report = info::read_info(&path, FormatVersion::Legacy).unwrap();
    assert_eq!(report.mode, ChannelLayout::Rgb);
    assert_eq!(report.bit_depth, 24);
}
