//! Painting a selected cluster into the output mask.

use image::GrayImage;

use crate::features::FeaturePoint;
use crate::window::Window;

/// Mask foreground value, matching the original annotation convention.
pub const FOREGROUND: u8 = 255;

/// Paint the points of `chosen` into `output` at absolute coordinates.
///
/// Only points within `core_radius` (Euclidean) of the centroid are painted:
/// window_radius bounds the search, core_radius bounds the expansion, and
/// both apply at once. Painting is a logical OR — pixels already set by
/// another centroid's region are never cleared. Returns the number of
/// pixels newly set.
pub fn paint(
    output: &mut GrayImage,
    points: &[FeaturePoint],
    labels: &[i32],
    chosen: i32,
    window: Window,
    centroid: (u32, u32),
    core_radius: u32,
) -> usize {
    debug_assert_eq!(points.len(), labels.len());
    let core_radius_sq = core_radius as f32 * core_radius as f32;
    let mut painted = 0usize;

    for (p, &label) in points.iter().zip(labels) {
        if label != chosen {
            continue;
        }
        let (row, col) = window.to_absolute(p.row, p.col);
        let dr = row as f32 - centroid.0 as f32;
        let dc = col as f32 - centroid.1 as f32;
        if dr * dr + dc * dc > core_radius_sq {
            continue;
        }
        let pixel = output.get_pixel_mut(col, row);
        if pixel[0] == 0 {
            pixel[0] = FOREGROUND;
            painted += 1;
        }
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::gray_image;

    fn pt(row: u32, col: u32) -> FeaturePoint {
        FeaturePoint {
            row,
            col,
            weight: 1.0,
        }
    }

    fn window() -> Window {
        Window {
            row_start: 5,
            row_end: 16,
            col_start: 5,
            col_end: 16,
        }
    }

    #[test]
    fn paints_chosen_points_at_absolute_coordinates() {
        let mut out = gray_image(20, 20, 0);
        let points = vec![pt(5, 5), pt(5, 6), pt(0, 0)];
        let labels = vec![0, 0, 1];

        let n = paint(&mut out, &points, &labels, 0, window(), (10, 10), 3);
        assert_eq!(n, 2);
        assert_eq!(out.get_pixel(10, 10)[0], FOREGROUND);
        assert_eq!(out.get_pixel(11, 10)[0], FOREGROUND);
        // Cluster 1's point stays unpainted.
        assert_eq!(out.get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn core_radius_bounds_the_region() {
        let mut out = gray_image(20, 20, 0);
        // All one cluster, but only points within 2px of the centroid paint.
        let points = vec![pt(5, 5), pt(5, 7), pt(5, 9)];
        let labels = vec![0, 0, 0];

        let n = paint(&mut out, &points, &labels, 0, window(), (10, 10), 2);
        assert_eq!(n, 2);
        assert_eq!(out.get_pixel(10, 10)[0], FOREGROUND);
        assert_eq!(out.get_pixel(12, 10)[0], FOREGROUND);
        assert_eq!(out.get_pixel(14, 10)[0], 0);
    }

    #[test]
    fn empty_selection_leaves_mask_unchanged() {
        let mut out = gray_image(20, 20, 0);
        let n = paint(&mut out, &[], &[], 0, window(), (10, 10), 4);
        assert_eq!(n, 0);
        assert!(out.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn painting_is_monotone_or() {
        let mut out = gray_image(20, 20, 0);
        let points = vec![pt(5, 5)];
        let labels = vec![0];

        assert_eq!(paint(&mut out, &points, &labels, 0, window(), (10, 10), 2), 1);
        // Second paint over the same pixel sets nothing new and clears nothing.
        assert_eq!(paint(&mut out, &points, &labels, 0, window(), (10, 10), 2), 0);
        assert_eq!(out.get_pixel(10, 10)[0], FOREGROUND);
    }
}
