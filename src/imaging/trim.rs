//! Trim: crop a uniform border down to the content plus a margin.
//!
//! The background is taken from the corners (3-of-4 consensus) and the
//! content box is measured on an RGBA copy. The crop itself is applied to the
//! image as loaded, so its color layout survives unchanged.

use super::background::corner_background;
use super::backend::ValidationError;
use super::calculations::BoundingBox;
use super::diff::content_bounds;
use image::DynamicImage;

/// Margin used by the `trim` command when neither the CLI nor config sets one.
pub const DEFAULT_TRIM_MARGIN: u32 = 10;

/// Crop region for `image` with `margin`, or `None` when nothing would be cut.
///
/// `None` covers both a uniform image (no content at all) and content whose
/// margin-expanded box already reaches every edge.
pub fn trim_box(image: &DynamicImage, margin: u32) -> Result<Option<BoundingBox>, ValidationError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let background = corner_background(&rgba)?;

    let Some(content) = content_bounds(&rgba, background) else {
        log::debug!("trim: image is entirely background");
        return Ok(None);
    };

    let expanded = content.expand(margin, width, height);
    if expanded.is_full(width, height) {
        log::debug!("trim: content {content:?} + margin {margin} covers the image");
        return Ok(None);
    }
    Ok(Some(expanded))
}

/// Trim `image` to its content plus `margin` pixels.
///
/// Returns the image and whether it was cropped. When nothing is cropped the
/// same image is handed back untouched.
pub fn trim(image: DynamicImage, margin: u32) -> Result<(DynamicImage, bool), ValidationError> {
    match trim_box(&image, margin)? {
        None => Ok((image, false)),
        Some(b) => {
            log::debug!(
                "trim: {}x{} -> {}x{} at ({}, {})",
                image.width(),
                image.height(),
                b.width(),
                b.height(),
                b.left,
                b.top
            );
            Ok((image.crop_imm(b.left, b.top, b.width(), b.height()), true))
        }
    }
}
