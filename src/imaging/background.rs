//! Background color estimation.
//!
//! Two strategies, both working on the RGBA8 view of an image:
//!
//! - [`corner_background`]: the four corners must agree 3-of-4. Used by trim,
//!   where a wrong guess would crop away real content.
//! - [`edge_background`]: plain majority over every border pixel. Used by
//!   extend, where the fill color only has to blend in.
//!
//! Ties go to the color encountered first in sampling order.

use super::backend::ValidationError;
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

/// Minimum number of agreeing corners for [`corner_background`].
pub const CORNER_CONSENSUS: usize = 3;

/// Most frequent color in `samples`, with its count.
///
/// Among tied counts the color whose first occurrence comes earliest wins.
fn most_common(samples: impl IntoIterator<Item = Rgba<u8>>) -> Option<(Rgba<u8>, usize)> {
    // color -> (count, first index)
    let mut counts: HashMap<Rgba<u8>, (usize, usize)> = HashMap::new();
    for (index, color) in samples.into_iter().enumerate() {
        counts.entry(color).or_insert((0, index)).0 += 1;
    }
    counts
        .into_iter()
        .min_by_key(|(_, (count, first))| (std::cmp::Reverse(*count), *first))
        .map(|(color, (count, _))| (color, count))
}

fn ensure_not_empty(image: &RgbaImage) -> Result<(u32, u32), ValidationError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ValidationError::EmptyImage { width, height });
    }
    Ok((width, height))
}

/// Background color from the four corners.
///
/// Fails with [`ValidationError::InconsistentBackground`] unless at least
/// [`CORNER_CONSENSUS`] corners share one exact color.
pub fn corner_background(image: &RgbaImage) -> Result<Rgba<u8>, ValidationError> {
    let (width, height) = ensure_not_empty(image)?;
    let corners = [
        *image.get_pixel(0, 0),
        *image.get_pixel(width - 1, 0),
        *image.get_pixel(0, height - 1),
        *image.get_pixel(width - 1, height - 1),
    ];

    let (color, matching) =
        most_common(corners).ok_or(ValidationError::EmptyImage { width, height })?;
    if matching < CORNER_CONSENSUS {
        return Err(ValidationError::InconsistentBackground { matching });
    }
    log::debug!("corner background {:?} ({matching}/4 corners)", color.0);
    Ok(color)
}

/// Every border coordinate exactly once, in sampling order.
///
/// Top and bottom rows are interleaved column by column, then the left and
/// right columns row by row, skipping the corners already visited.
pub(super) fn border_coordinates(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let rows = (0..width).flat_map(move |x| {
        let bottom = (height > 1).then_some((x, height - 1));
        std::iter::once((x, 0)).chain(bottom)
    });
    let columns = (1..height.saturating_sub(1)).flat_map(move |y| {
        let right = (width > 1).then_some((width - 1, y));
        std::iter::once((0, y)).chain(right)
    });
    rows.chain(columns)
}

fn border_pixels(image: &RgbaImage) -> Vec<Rgba<u8>> {
    let (width, height) = image.dimensions();
    border_coordinates(width, height)
        .map(|(x, y)| *image.get_pixel(x, y))
        .collect()
}

/// Background color as the most frequent color along all four edges.
pub fn edge_background(image: &RgbaImage) -> Result<Rgba<u8>, ValidationError> {
    let (width, height) = ensure_not_empty(image)?;
    let (color, count) = most_common(border_pixels(image))
        .ok_or(ValidationError::EmptyImage { width, height })?;
    log::debug!("edge background {:?} ({count} border pixels)", color.0);
    Ok(color)
}
