//! Shared test helpers for building synthetic images.

use image::{GrayImage, Luma};

/// Create a `width` x `height` image filled with one intensity.
pub(crate) fn gray_image(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// Fill a `size` x `size` block with `value`, top-left at (row, col).
pub(crate) fn set_block(img: &mut GrayImage, top_row: u32, left_col: u32, size: u32, value: u8) {
    for row in top_row..top_row + size {
        for col in left_col..left_col + size {
            img.put_pixel(col, row, Luma([value]));
        }
    }
}
