//! Bounding box of pixels that differ from a uniform reference color.

use super::calculations::BoundingBox;
use image::{Rgba, RgbaImage};

/// Smallest box enclosing every pixel accepted by `differs`.
fn bounds_where(image: &RgbaImage, differs: impl Fn(&Rgba<u8>) -> bool) -> Option<BoundingBox> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !differs(pixel) {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| BoundingBox::new(min_x, min_y, max_x + 1, max_y + 1))
}

/// Content box of `image` measured against `reference`, or `None` when the
/// whole image matches it.
///
/// Alpha is measured first: pixels whose opacity differs from the reference
/// make up the box, so fully transparent pixels count as background whatever
/// color values they carry. Only when every pixel shares the reference alpha
/// are the color channels compared, which is what finds content on an opaque
/// image.
pub fn content_bounds(image: &RgbaImage, reference: Rgba<u8>) -> Option<BoundingBox> {
    bounds_where(image, |p| p[3] != reference[3])
        .or_else(|| bounds_where(image, |p| p.0[..3] != reference.0[..3]))
}
