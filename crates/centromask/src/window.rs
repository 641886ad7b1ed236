//! Local analysis windows around annotated centroids.
//!
//! A window is a square region `centroid ± radius`, clipped to the image and
//! stored with half-open row/column bounds. All clustering work for one
//! centroid happens in window-local coordinates; [`Window::to_absolute`]
//! maps results back into the full image.

use crate::error::MaskError;

/// Half-open rectangular region of an image, in (row, col) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First row inside the window.
    pub row_start: u32,
    /// One past the last row inside the window.
    pub row_end: u32,
    /// First column inside the window.
    pub col_start: u32,
    /// One past the last column inside the window.
    pub col_end: u32,
}

impl Window {
    /// Compute the analysis window for `centroid` in an image of the given
    /// `(width, height)`.
    ///
    /// The window spans `centroid ± radius` and is clipped to the image, so
    /// a centroid near a corner yields a smaller window rather than an
    /// out-of-bounds access. A centroid outside the image is a
    /// data-integrity violation and fails with
    /// [`MaskError::CentroidOutOfBounds`].
    pub fn extract(
        image_dims: (u32, u32),
        centroid: (u32, u32),
        radius: u32,
    ) -> Result<Window, MaskError> {
        let (width, height) = image_dims;
        let (row, col) = centroid;
        if row >= height || col >= width {
            return Err(MaskError::CentroidOutOfBounds {
                row,
                col,
                width,
                height,
            });
        }
        Ok(Window {
            row_start: row.saturating_sub(radius),
            row_end: ((row as u64 + radius as u64 + 1).min(height as u64)) as u32,
            col_start: col.saturating_sub(radius),
            col_end: ((col as u64 + radius as u64 + 1).min(width as u64)) as u32,
        })
    }

    /// Window width in pixels.
    pub fn width(&self) -> u32 {
        self.col_end - self.col_start
    }

    /// Window height in pixels.
    pub fn height(&self) -> u32 {
        self.row_end - self.row_start
    }

    /// Whether an absolute (row, col) coordinate lies inside the window.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.row_start && row < self.row_end && col >= self.col_start && col < self.col_end
    }

    /// Map an absolute coordinate to window-local (row, col).
    ///
    /// The coordinate must lie inside the window.
    pub fn to_local(&self, row: u32, col: u32) -> (u32, u32) {
        debug_assert!(self.contains(row, col));
        (row - self.row_start, col - self.col_start)
    }

    /// Map a window-local coordinate back to absolute (row, col).
    pub fn to_absolute(&self, row: u32, col: u32) -> (u32, u32) {
        (row + self.row_start, col + self.col_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_centroid_gets_full_window() {
        let w = Window::extract((100, 80), (40, 50), 5).unwrap();
        assert_eq!(w.row_start, 35);
        assert_eq!(w.row_end, 46);
        assert_eq!(w.col_start, 45);
        assert_eq!(w.col_end, 56);
        assert_eq!(w.width(), 11);
        assert_eq!(w.height(), 11);
        assert!(w.contains(40, 50));
    }

    #[test]
    fn corner_centroid_clips_to_image() {
        // Radius larger than the whole image: clipped, never out of bounds.
        let w = Window::extract((20, 20), (0, 0), 50).unwrap();
        assert_eq!(w.row_start, 0);
        assert_eq!(w.row_end, 20);
        assert_eq!(w.col_start, 0);
        assert_eq!(w.col_end, 20);
        assert!(w.contains(0, 0));
    }

    #[test]
    fn edge_centroid_clips_far_side() {
        let w = Window::extract((30, 30), (29, 15), 4).unwrap();
        assert_eq!(w.row_end, 30);
        assert_eq!(w.row_start, 25);
    }

    #[test]
    fn out_of_bounds_centroid_is_an_error() {
        let err = Window::extract((20, 20), (20, 5), 3).unwrap_err();
        assert!(matches!(err, MaskError::CentroidOutOfBounds { .. }));
        assert!(Window::extract((20, 20), (5, 99), 3).is_err());
    }

    #[test]
    fn local_absolute_round_trip() {
        let w = Window::extract((64, 64), (10, 12), 3).unwrap();
        let (lr, lc) = w.to_local(10, 12);
        assert_eq!(w.to_absolute(lr, lc), (10, 12));
    }

    #[test]
    fn radius_overflow_is_clipped() {
        let w = Window::extract((16, 16), (8, 8), u32::MAX).unwrap();
        assert_eq!(w.row_end, 16);
        assert_eq!(w.col_end, 16);
    }
}
