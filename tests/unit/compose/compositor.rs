use std::io::Cursor;

use super::*;
use image::{ImageFormat, Rgba, RgbaImage};

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    png_bytes(&RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// A realistic bezel: opaque gray outside the viewport, transparent inside.
fn bezel_png(width: u32, height: u32, insets: &InsetConfig) -> Vec<u8> {
    let vp = Viewport::from_insets(width, height, insets).unwrap();
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= vp.x && x < vp.x + vp.width && y >= vp.y && y < vp.y + vp.height;
        if inside {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([90, 90, 90, 255])
        }
    });
    png_bytes(&img)
}

#[test]
fn viewport_math_matches_rounded_inset_fractions() {
    let vp = Viewport::from_insets(1206, 2622, &InsetConfig::default()).unwrap();
    // left = round(1206*0.05) = 60, top = round(2622*0.025) = 66
    assert_eq!(vp.x, 60);
    assert_eq!(vp.y, 66);
    assert_eq!(vp.width, 1206 - 60 - 60);
    assert_eq!(vp.height, 2622 - 66 - 66);
}

#[test]
fn overlapping_insets_fail_with_invalid_viewport() {
    let insets = InsetConfig {
        left: 0.6,
        right: 0.6,
        ..InsetConfig::default()
    };
    let err = Viewport::from_insets(100, 100, &insets).unwrap_err();
    assert!(matches!(err, MockupError::InvalidViewport(_)));

    let insets = InsetConfig {
        top: 0.5,
        bottom: 0.5,
        ..InsetConfig::default()
    };
    let err = Viewport::from_insets(100, 100, &insets).unwrap_err();
    assert!(matches!(err, MockupError::InvalidViewport(_)));
}

#[test]
fn corner_radius_is_clamped_to_half_the_short_side() {
    let vp = Viewport {
        x: 0,
        y: 0,
        width: 100,
        height: 200,
    };
    assert_eq!(vp.corner_radius_px(0.0), 0);
    assert_eq!(vp.corner_radius_px(0.1), 10);
    // 0.5 of the short side is exactly half; anything above clamps there.
    assert_eq!(vp.corner_radius_px(0.5), 50);
    assert_eq!(vp.corner_radius_px(5.0), 50);
}

#[test]
fn output_dimensions_always_equal_the_frame() {
    let frame = solid_png(120, 260, [40, 40, 40, 255]);
    for (w, h) in [(50, 50), (1000, 400), (33, 999)] {
        let shot = solid_png(w, h, [255, 0, 0, 255]);
        let out = compose_with_defaults(&frame, &shot).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 260));
    }
}

#[test]
fn identical_inputs_produce_byte_identical_output() {
    let frame = bezel_png(100, 100, &InsetConfig::default());
    let shot = solid_png(50, 100, [0, 200, 0, 255]);
    let a = compose_with_defaults(&frame, &shot).unwrap();
    let b = compose_with_defaults(&frame, &shot).unwrap();
    assert_eq!(a, b);
}

#[test]
fn garbage_frame_is_invalid_frame() {
    let shot = solid_png(10, 10, [0, 0, 0, 255]);
    let err = compose_with_defaults(b"definitely not a png", &shot).unwrap_err();
    assert!(matches!(err, MockupError::InvalidFrame(_)));

    let err = compose_with_defaults(&[], &shot).unwrap_err();
    assert!(matches!(err, MockupError::InvalidFrame(_)));
}

#[test]
fn garbage_screenshot_is_unreadable_image() {
    let frame = solid_png(10, 10, [0, 0, 0, 255]);
    let err = compose(&frame, b"nope", &InsetConfig::default()).unwrap_err();
    assert!(matches!(err, MockupError::UnreadableImage(_)));
}

#[test]
fn degenerate_insets_fail_before_screenshot_decode() {
    let frame = solid_png(10, 10, [0, 0, 0, 255]);
    let insets = InsetConfig {
        left: 0.5,
        right: 0.5,
        ..InsetConfig::default()
    };
    // Screenshot bytes are never touched when the viewport is degenerate.
    let err = compose(&frame, b"unused", &insets).unwrap_err();
    assert!(matches!(err, MockupError::InvalidViewport(_)));
}

#[test]
fn red_screenshot_fills_viewport_with_rounded_corners() {
    let insets = InsetConfig::default();
    let frame = bezel_png(100, 100, &insets);
    let shot = solid_png(50, 100, [255, 0, 0, 255]);

    let out = compose(&frame, &shot, &insets).unwrap();
    let img = image::load_from_memory(&out).unwrap().to_rgba8();
    let vp = Viewport::from_insets(100, 100, &insets).unwrap();

    // Bezel pixels outside the viewport are untouched frame pixels.
    assert_eq!(img.get_pixel(0, 0).0, [90, 90, 90, 255]);
    assert_eq!(img.get_pixel(99, 99).0, [90, 90, 90, 255]);

    // Viewport center is solid red.
    let cx = vp.x + vp.width / 2;
    let cy = vp.y + vp.height / 2;
    assert_eq!(img.get_pixel(cx, cy).0, [255, 0, 0, 255]);

    // The viewport's corner pixel is clipped by the rounded mask, and the
    // frame is transparent there, so it stays fully transparent.
    assert_eq!(img.get_pixel(vp.x, vp.y).0[3], 0);

    // Just inside the corner arc the tile is red again.
    let r = vp.corner_radius_px(insets.corner_radius);
    assert_eq!(img.get_pixel(vp.x + r, vp.y + r).0, [255, 0, 0, 255]);
}

#[test]
fn default_insets_match_the_published_values() {
    let d = InsetConfig::default();
    assert_eq!(
        (d.left, d.right, d.top, d.bottom, d.corner_radius),
        (0.05, 0.05, 0.025, 0.025, 0.10)
    );
}
