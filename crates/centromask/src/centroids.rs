//! Centroid extraction from sparse pre-mask annotations.
//!
//! Pre-masks mark target centers as isolated nonzero pixels, occasionally
//! smeared into small blobs by annotation tools. Each 8-connected blob
//! contributes exactly one centroid: the unweighted mean of its pixel
//! coordinates, rounded to the nearest pixel.

use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

/// Extract one (row, col) centroid per connected nonzero pre-mask blob.
///
/// Result is sorted ascending by (row, col) so downstream processing order
/// is deterministic.
pub fn extract_centroids(premask: &GrayImage) -> Vec<(u32, u32)> {
    let (width, height) = premask.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    // Binarize so unequal nonzero annotation values still merge into one blob.
    let mut binary = GrayImage::new(width, height);
    for (x, y, p) in premask.enumerate_pixels() {
        if p[0] != 0 {
            binary.put_pixel(x, y, Luma([255u8]));
        }
    }

    let labeled = connected_components(&binary, Connectivity::Eight, Luma([0u8]));

    // Accumulate per-component coordinate sums; component 0 is background.
    let mut sums: Vec<(u64, u64, u64)> = Vec::new();
    for (x, y, p) in labeled.enumerate_pixels() {
        let label = p[0] as usize;
        if label == 0 {
            continue;
        }
        if label > sums.len() {
            sums.resize(label, (0, 0, 0));
        }
        let entry = &mut sums[label - 1];
        entry.0 += y as u64;
        entry.1 += x as u64;
        entry.2 += 1;
    }

    let mut centroids: Vec<(u32, u32)> = sums
        .iter()
        .filter(|(_, _, count)| *count > 0)
        .map(|&(row_sum, col_sum, count)| {
            let row = (row_sum as f64 / count as f64).round() as u32;
            let col = (col_sum as f64 / count as f64).round() as u32;
            (row.min(height - 1), col.min(width - 1))
        })
        .collect();
    centroids.sort_unstable();
    centroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gray_image, set_block};

    #[test]
    fn empty_mask_has_no_centroids() {
        let mask = gray_image(16, 16, 0);
        assert!(extract_centroids(&mask).is_empty());
    }

    #[test]
    fn isolated_pixels_are_individual_centroids() {
        let mut mask = gray_image(32, 32, 0);
        mask.put_pixel(4, 20, Luma([255]));
        mask.put_pixel(25, 3, Luma([255]));
        // Sorted by (row, col): (3, 25) before (20, 4).
        assert_eq!(extract_centroids(&mask), vec![(3, 25), (20, 4)]);
    }

    #[test]
    fn blob_collapses_to_its_center() {
        let mut mask = gray_image(32, 32, 0);
        set_block(&mut mask, 10, 14, 3, 255);
        assert_eq!(extract_centroids(&mask), vec![(11, 15)]);
    }

    #[test]
    fn different_nonzero_values_merge_into_one_blob() {
        let mut mask = gray_image(16, 16, 0);
        mask.put_pixel(5, 5, Luma([128]));
        mask.put_pixel(6, 5, Luma([255]));
        assert_eq!(extract_centroids(&mask).len(), 1);
    }

    #[test]
    fn diagonal_pixels_are_eight_connected() {
        let mut mask = gray_image(16, 16, 0);
        mask.put_pixel(5, 5, Luma([255]));
        mask.put_pixel(6, 6, Luma([255]));
        assert_eq!(extract_centroids(&mask).len(), 1);
    }
}
