//! Image Decode Tests
//!
//! Tests for:
//! - Well-formed image bytes: nonzero dimensions, non-empty RGBA8 buffer
//! - Color space to texture format mapping
//! - Corrupt bytes and missing files: explicit failure signals
//! - Handle-level payload access through a fetch

use relic::{ColorSpace, ResourceError};
use relic::resources::{decode_image, decode_image_file};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

// ============================================================================
// In-Memory Decode
// ============================================================================

#[test]
fn decode_well_formed_png() {
    let decoded = decode_image(&png_bytes(6, 4), ColorSpace::Srgb, "fixture").unwrap();

    assert_eq!(decoded.width(), 6);
    assert_eq!(decoded.height(), 4);
    assert!(decoded.is_valid());
    // RGBA8: exactly 4 bytes per pixel.
    assert_eq!(decoded.byte_size(), 6 * 4 * 4);
    assert_eq!(decoded.max_dimension(), 6);
}

#[test]
fn decode_preserves_pixel_values() {
    let decoded = decode_image(&png_bytes(2, 1), ColorSpace::Linear, "fixture").unwrap();
    // Pixel (1, 0) was written as [1, 0, 128, 255].
    assert_eq!(&decoded.data()[4..8], &[1, 0, 128, 255]);
}

#[test]
fn color_space_decides_the_format() {
    let srgb = decode_image(&png_bytes(2, 2), ColorSpace::Srgb, "srgb").unwrap();
    let linear = decode_image(&png_bytes(2, 2), ColorSpace::Linear, "linear").unwrap();

    assert_eq!(srgb.format(), wgpu::TextureFormat::Rgba8UnormSrgb);
    assert_eq!(linear.format(), wgpu::TextureFormat::Rgba8Unorm);
}

#[test]
fn decode_corrupt_bytes_is_an_explicit_error() {
    let err = decode_image(&[0x89, 0x50, 0x4e, 0x47, 0xff, 0x00], ColorSpace::Srgb, "bad")
        .unwrap_err();
    match err {
        ResourceError::ImageDecode(msg) => assert!(msg.contains("bad")),
        other => panic!("expected ImageDecode, got {other}"),
    }
}

// ============================================================================
// Disk Decode
// ============================================================================

#[test]
fn decode_image_file_roundtrip() {
    let dir = std::env::temp_dir().join(format!("relic-decode-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("fixture.png");
    std::fs::write(&path, png_bytes(5, 3)).unwrap();

    let decoded = decode_image_file(&path, ColorSpace::Srgb).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (5, 3));
    assert!(decoded.is_valid());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn decode_nonexistent_path_is_not_found_not_a_crash() {
    let err = decode_image_file("/no/such/dir/missing.png", ColorSpace::Srgb).unwrap_err();
    assert!(matches!(err, ResourceError::NotFound(_)));
}

#[test]
fn decode_unreadable_content_on_disk_is_a_decode_error() {
    let dir = std::env::temp_dir().join(format!("relic-decode-bad-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("not_an_image.png");
    std::fs::write(&path, b"plain text, not pixels").unwrap();

    let err = decode_image_file(&path, ColorSpace::Srgb).unwrap_err();
    assert!(matches!(err, ResourceError::ImageDecode(_)));

    std::fs::remove_dir_all(&dir).ok();
}
