//! The mockup compositor: place a screenshot inside a device frame's screen
//! viewport and layer the frame's bezel over it.
//!
//! The pipeline is a strict chain of pure stages over in-memory buffers:
//! decode -> measure -> resize -> mask -> layer -> encode. A call either yields
//! one complete PNG or an error; there are no partial results and no retries.

use image::RgbaImage;
use tracing::debug;

use crate::compose::raster;
use crate::foundation::error::{MockupError, MockupResult};

/// Fractional insets of the screen viewport within the frame image, plus the
/// corner radius as a fraction of the shorter viewport dimension.
///
/// Insets are fractions in `[0, 0.5)` of the frame's width (left/right) or
/// height (top/bottom); the radius is a fraction in `[0, 0.5]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InsetConfig {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub corner_radius: f64,
}

impl Default for InsetConfig {
    fn default() -> Self {
        Self {
            left: 0.05,
            right: 0.05,
            top: 0.025,
            bottom: 0.025,
            corner_radius: 0.10,
        }
    }
}

/// Screen viewport rectangle in frame-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Compute the viewport for a `frame_w` x `frame_h` frame from fractional
    /// insets. Fails with [`MockupError::InvalidViewport`] when the resulting
    /// rectangle has a non-positive extent.
    pub fn from_insets(frame_w: u32, frame_h: u32, insets: &InsetConfig) -> MockupResult<Self> {
        let left = (f64::from(frame_w) * insets.left).round() as i64;
        let right = i64::from(frame_w) - (f64::from(frame_w) * insets.right).round() as i64;
        let top = (f64::from(frame_h) * insets.top).round() as i64;
        let bottom = i64::from(frame_h) - (f64::from(frame_h) * insets.bottom).round() as i64;

        let width = right - left;
        let height = bottom - top;
        if left < 0 || top < 0 || width <= 0 || height <= 0 {
            return Err(MockupError::invalid_viewport(format!(
                "insets leave no screen area inside a {frame_w}x{frame_h} frame"
            )));
        }
        Ok(Self {
            x: left as u32,
            y: top as u32,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Corner radius in pixels: relative to the shorter viewport dimension and
    /// never more than half of it, so the rounded shape cannot degenerate.
    pub fn corner_radius_px(&self, radius: f64) -> u32 {
        let short = self.width.min(self.height);
        let px = (f64::from(short) * radius).round() as i64;
        px.clamp(0, i64::from(short / 2)) as u32
    }
}

/// Composite `screenshot_bytes` into `frame_bytes` and return PNG bytes.
///
/// The output image always has the frame's dimensions. Fails with
/// [`MockupError::InvalidFrame`] when the frame cannot be decoded,
/// [`MockupError::InvalidViewport`] when the insets produce a non-positive
/// screen area, and [`MockupError::UnreadableImage`] when the screenshot
/// cannot be decoded.
pub fn compose(
    frame_bytes: &[u8],
    screenshot_bytes: &[u8],
    insets: &InsetConfig,
) -> MockupResult<Vec<u8>> {
    if frame_bytes.is_empty() {
        return Err(MockupError::invalid_frame("frame image is empty"));
    }
    if screenshot_bytes.is_empty() {
        return Err(MockupError::unreadable_image("screenshot is empty"));
    }

    let frame = raster::decode_rgba(frame_bytes)
        .map_err(|e| MockupError::invalid_frame(format!("{e:#}")))?;
    let (frame_w, frame_h) = frame.dimensions();
    let viewport = Viewport::from_insets(frame_w, frame_h, insets)?;
    debug!(
        frame_w,
        frame_h,
        viewport_w = viewport.width,
        viewport_h = viewport.height,
        "composing mockup"
    );

    let screenshot = raster::decode_rgba_oriented(screenshot_bytes)
        .map_err(|e| MockupError::unreadable_image(format!("{e:#}")))?;
    let mut tile = raster::cover_resize(&screenshot, viewport.width, viewport.height);

    let mask = raster::rounded_mask(
        viewport.width,
        viewport.height,
        viewport.corner_radius_px(insets.corner_radius),
    );
    raster::mask_dest_in(&mut tile, &mask)?;

    // Masked screenshot on a transparent frame-sized canvas, frame bezel over.
    let mut canvas = RgbaImage::new(frame_w, frame_h);
    image::imageops::replace(&mut canvas, &tile, i64::from(viewport.x), i64::from(viewport.y));
    raster::over_in_place(&mut canvas, &frame)?;

    Ok(raster::encode_png(&canvas)?)
}

/// [`compose`] with the default [`InsetConfig`].
pub fn compose_with_defaults(frame_bytes: &[u8], screenshot_bytes: &[u8]) -> MockupResult<Vec<u8>> {
    compose(frame_bytes, screenshot_bytes, &InsetConfig::default())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
