//! Extend: center an image on a canvas three times its size.
//!
//! The fill color is the majority color along the image's border. Sources
//! without alpha are copied into a canvas of their own pixel type, so 16-bit
//! and float images keep their exact values. Sources with alpha are
//! alpha-composited onto an RGBA8 canvas so their transparent pixels leave the
//! fill visible.

use super::background::{border_coordinates, edge_background};
use super::backend::ValidationError;
use super::calculations::extend_layout;
use image::{DynamicImage, ImageBuffer, Pixel, RgbaImage, imageops};

/// Canvas of `canvas` size filled with the source pixel at `fill_at`, with the
/// source copied in at `offset`.
fn place_on_fill<P: Pixel>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    fill_at: (u32, u32),
    canvas: (u32, u32),
    offset: (u32, u32),
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let fill = *source.get_pixel(fill_at.0, fill_at.1);
    let mut out = ImageBuffer::from_pixel(canvas.0, canvas.1, fill);
    imageops::replace(&mut out, source, offset.0.into(), offset.1.into());
    out
}

/// Triple both dimensions of `image`, placing it at `(width, height)` on a
/// canvas filled with its edge background color.
///
/// Always produces a new image; there is no "unchanged" outcome. L8, L16,
/// Rgb8, Rgb16 and Rgb32F sources keep their layout; every other layout comes
/// back as RGBA8.
pub fn extend(image: DynamicImage) -> Result<DynamicImage, ValidationError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let background = edge_background(&rgba)?;
    let (canvas, offset) = extend_layout(width, height);

    // First border pixel carrying the background, read back in native precision
    let fill_at = border_coordinates(width, height)
        .find(|&(x, y)| *rgba.get_pixel(x, y) == background)
        .ok_or(ValidationError::EmptyImage { width, height })?;

    let out = match &image {
        DynamicImage::ImageLuma8(buf) => {
            DynamicImage::ImageLuma8(place_on_fill(buf, fill_at, canvas, offset))
        }
        DynamicImage::ImageLuma16(buf) => {
            DynamicImage::ImageLuma16(place_on_fill(buf, fill_at, canvas, offset))
        }
        DynamicImage::ImageRgb8(buf) => {
            DynamicImage::ImageRgb8(place_on_fill(buf, fill_at, canvas, offset))
        }
        DynamicImage::ImageRgb16(buf) => {
            DynamicImage::ImageRgb16(place_on_fill(buf, fill_at, canvas, offset))
        }
        DynamicImage::ImageRgb32F(buf) => {
            DynamicImage::ImageRgb32F(place_on_fill(buf, fill_at, canvas, offset))
        }
        _ => {
            let mut out = RgbaImage::from_pixel(canvas.0, canvas.1, background);
            imageops::overlay(&mut out, &rgba, offset.0.into(), offset.1.into());
            DynamicImage::ImageRgba8(out)
        }
    };

    log::debug!(
        "extend: {width}x{height} -> {}x{}, fill {:?}",
        canvas.0,
        canvas.1,
        background.0
    );
    Ok(out)
}
