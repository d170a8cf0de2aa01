//! Pixel-level primitives for the mockup pipeline: decode, cover-fit resize,
//! rounded-corner masking, straight-alpha compositing, PNG encode.
//!
//! Everything here operates on straight (non-premultiplied) RGBA8 buffers, the
//! `image` crate's native layout, and is deterministic for a given input.

use std::io::Cursor;

use anyhow::Context;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};

/// Decode encoded image bytes to RGBA8, forcing an alpha channel.
pub(crate) fn decode_rgba(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img.to_rgba8())
}

/// Decode like [`decode_rgba`], additionally applying any embedded EXIF
/// orientation so pixel data matches the intended display rotation.
pub(crate) fn decode_rgba_oriented(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("sniff image format")?;
    let mut decoder = reader.into_decoder().context("open image decoder")?;
    let orientation = decoder.orientation().context("read image orientation")?;
    let mut img = DynamicImage::from_decoder(decoder).context("decode image from memory")?;
    img.apply_orientation(orientation);
    Ok(img.to_rgba8())
}

/// Resize with a "cover" fit: scale uniformly until the image fully covers
/// `target_w` x `target_h` (no letterboxing), then center-crop the overflow.
pub(crate) fn cover_resize(src: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let scale = (f64::from(target_w) / f64::from(w)).max(f64::from(target_h) / f64::from(h));
    // Rounding may land a pixel short of the target box; never undershoot it.
    let scaled_w = ((f64::from(w) * scale).round() as u32).max(target_w);
    let scaled_h = ((f64::from(h) * scale).round() as u32).max(target_h);

    let scaled = image::imageops::resize(src, scaled_w, scaled_h, FilterType::Lanczos3);
    let x = (scaled_w - target_w) / 2;
    let y = (scaled_h - target_h) / 2;
    image::imageops::crop_imm(&scaled, x, y, target_w, target_h).to_image()
}

/// Build a rounded-rectangle coverage mask: 255 inside the rounded rect,
/// 0 outside, with a one-pixel antialiased edge on the corner arcs.
pub(crate) fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let r = f64::from(radius);
    GrayImage::from_fn(width, height, |x, y| {
        let px = f64::from(x) + 0.5;
        let py = f64::from(y) + 0.5;

        // Distance from the pixel center to the nearest corner-circle center,
        // but only when the pixel sits inside one of the corner squares.
        let cx = if px < r {
            Some(r)
        } else if px > f64::from(width) - r {
            Some(f64::from(width) - r)
        } else {
            None
        };
        let cy = if py < r {
            Some(r)
        } else if py > f64::from(height) - r {
            Some(f64::from(height) - r)
        } else {
            None
        };

        let coverage = match (cx, cy) {
            (Some(cx), Some(cy)) => {
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                (r + 0.5 - dist).clamp(0.0, 1.0)
            }
            _ => 1.0,
        };
        image::Luma([(coverage * 255.0).round() as u8])
    })
}

/// Destination-in combine: keep `img`'s pixels only where `mask` is opaque.
/// Color channels are untouched; alpha is scaled by the mask coverage.
pub(crate) fn mask_dest_in(img: &mut RgbaImage, mask: &GrayImage) -> anyhow::Result<()> {
    if img.dimensions() != mask.dimensions() {
        anyhow::bail!("mask dimensions must match image dimensions");
    }
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px.0[3] = mul_div255(u16::from(px.0[3]), u16::from(m.0[0]));
    }
    Ok(())
}

/// Standard "over" alpha blend of straight-alpha `src` onto `dst`, in place.
pub(crate) fn over_in_place(dst: &mut RgbaImage, src: &RgbaImage) -> anyhow::Result<()> {
    if dst.dimensions() != src.dimensions() {
        anyhow::bail!("over_in_place expects equal-size rgba8 images");
    }
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        d.0 = over(d.0, s.0);
    }
    Ok(())
}

/// Straight-alpha Porter-Duff "over" for a single pixel.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Output alpha scaled by 255^2 so the color divide stays in integers.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    out
}

/// Encode an RGBA image as PNG bytes.
pub(crate) fn encode_png(img: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
