//! Pure geometry for trim and extend.
//!
//! All functions here are pure and testable without any I/O or images.

/// Axis-aligned rectangle, half-open on the right and bottom edges.
///
/// Invariant: `left <= right` and `top <= bottom`. A box covering
/// `(0, 0, width, height)` means "the whole image".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        debug_assert!(left <= right && top <= bottom);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box covering an entire `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_full(&self, width: u32, height: u32) -> bool {
        *self == Self::full(width, height)
    }

    /// Grow by `margin` on every side, clamped to a `width x height` image.
    ///
    /// # Examples
    /// ```
    /// # use logokit::imaging::BoundingBox;
    /// // 1px of content at (5, 5) with a 48px margin clamps to the full 10x10 image.
    /// let grown = BoundingBox::new(5, 5, 6, 6).expand(48, 10, 10);
    /// assert_eq!(grown, BoundingBox::full(10, 10));
    /// ```
    pub fn expand(&self, margin: u32, width: u32, height: u32) -> Self {
        Self::new(
            self.left.saturating_sub(margin),
            self.top.saturating_sub(margin),
            self.right.saturating_add(margin).min(width),
            self.bottom.saturating_add(margin).min(height),
        )
    }
}

/// Canvas size and paste offset for centering a `width x height` image on a
/// canvas three times larger in each axis.
///
/// Returns `((canvas_width, canvas_height), (offset_x, offset_y))`.
pub fn extend_layout(width: u32, height: u32) -> ((u32, u32), (u32, u32)) {
    ((width * 3, height * 3), (width, height))
}
