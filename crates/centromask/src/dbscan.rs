//! Density-based clustering over window feature points (DBSCAN semantics).
//!
//! Classic Ester et al. (1996) formulation: a point is core when at least
//! `min_samples` points (itself included) lie within `eps`; clusters are the
//! transitive closure over core-point connectivity; non-core points reached
//! from a core point join its cluster as border points; everything else is
//! noise. Labeling is deterministic for a fixed point order: points are
//! scanned in index order, ids assigned in discovery order, and expansion
//! uses a FIFO queue, so the first-discovered core point wins all ties.
//!
//! Point sets here are bounded by the analysis window, so the quadratic
//! neighborhood scan is fine; no spatial index is needed.

use std::collections::VecDeque;

use crate::features::FeaturePoint;

/// Cluster label for points not density-reachable from any core point.
pub const NOISE: i32 = -1;

const UNCLASSIFIED: i32 = -2;

/// Cluster the point set; returns one label per point (`0..` or [`NOISE`]).
///
/// Distance is Euclidean over (row, col, weight_scale * weight). Degenerate
/// input — empty, a single point, or fewer than `min_samples` points — is
/// all noise, never an error.
pub fn dbscan(
    points: &[FeaturePoint],
    eps: f32,
    min_samples: usize,
    weight_scale: f32,
) -> Vec<i32> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    if n < min_samples {
        // No point can be core.
        return vec![NOISE; n];
    }

    let eps_sq = eps * eps;
    let mut labels = vec![UNCLASSIFIED; n];
    let mut next_cluster = 0i32;

    for i in 0..n {
        if labels[i] != UNCLASSIFIED {
            continue;
        }
        let neighbors = region_query(points, i, eps_sq, weight_scale);
        if neighbors.len() < min_samples {
            // May still be promoted to a border point later.
            labels[i] = NOISE;
            continue;
        }

        labels[i] = next_cluster;
        let mut frontier: VecDeque<usize> =
            neighbors.into_iter().filter(|&j| j != i).collect();
        while let Some(j) = frontier.pop_front() {
            if labels[j] == NOISE {
                // Border point: joins the cluster but does not expand it.
                labels[j] = next_cluster;
                continue;
            }
            if labels[j] != UNCLASSIFIED {
                continue;
            }
            labels[j] = next_cluster;
            let reach = region_query(points, j, eps_sq, weight_scale);
            if reach.len() >= min_samples {
                for k in reach {
                    if labels[k] == UNCLASSIFIED || labels[k] == NOISE {
                        frontier.push_back(k);
                    }
                }
            }
        }
        next_cluster += 1;
    }

    labels
}

/// Indices of all points within eps of `points[center]`, center included.
fn region_query(
    points: &[FeaturePoint],
    center: usize,
    eps_sq: f32,
    weight_scale: f32,
) -> Vec<usize> {
    let c = points[center];
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| distance_sq(&c, p, weight_scale) <= eps_sq)
        .map(|(i, _)| i)
        .collect()
}

#[inline]
fn distance_sq(a: &FeaturePoint, b: &FeaturePoint, weight_scale: f32) -> f32 {
    let dr = a.row as f32 - b.row as f32;
    let dc = a.col as f32 - b.col as f32;
    let dw = weight_scale * (a.weight - b.weight);
    dr * dr + dc * dc + dw * dw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(row: u32, col: u32) -> FeaturePoint {
        FeaturePoint {
            row,
            col,
            weight: 0.5,
        }
    }

    #[test]
    fn empty_and_degenerate_inputs_are_noise() {
        assert!(dbscan(&[], 1.5, 3, 0.0).is_empty());
        assert_eq!(dbscan(&[pt(0, 0)], 1.5, 3, 0.0), vec![NOISE]);
        assert_eq!(dbscan(&[pt(0, 0), pt(0, 1)], 1.5, 3, 0.0), vec![NOISE; 2]);
    }

    #[test]
    fn dense_block_forms_one_cluster() {
        let mut points = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                points.push(pt(r, c));
            }
        }
        let labels = dbscan(&points, 1.5, 3, 0.0);
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn separated_blocks_form_two_clusters_isolated_point_is_noise() {
        let mut points = Vec::new();
        for r in 0..2 {
            for c in 0..2 {
                points.push(pt(r, c));
            }
        }
        for r in 10..12 {
            for c in 10..12 {
                points.push(pt(r, c));
            }
        }
        points.push(pt(30, 30));

        let labels = dbscan(&points, 1.5, 3, 0.0);
        assert_eq!(&labels[0..4], &[0, 0, 0, 0]);
        assert_eq!(&labels[4..8], &[1, 1, 1, 1]);
        assert_eq!(labels[8], NOISE);
    }

    #[test]
    fn border_point_joins_first_discovered_cluster() {
        // 4-point chain with eps 1.0: point 0 is labeled noise on its own
        // scan (only 2 neighbors), then promoted to a border point once the
        // core point at index 1 expands. The chain end stays a border point.
        let points = vec![
            pt(0, 0),
            pt(0, 1),
            pt(0, 2),
            pt(0, 3), // border: within eps of the chain end
        ];
        let labels = dbscan(&points, 1.0, 3, 0.0);
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn labeling_is_deterministic() {
        let mut points = Vec::new();
        for r in 0..4 {
            for c in 0..4 {
                if (r + c) % 2 == 0 {
                    points.push(pt(r * 3, c * 3));
                }
            }
        }
        let a = dbscan(&points, 4.0, 2, 0.0);
        let b = dbscan(&points, 4.0, 2, 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn weight_axis_separates_equal_positions() {
        // Same spatial layout, two intensity levels; a large weight scale
        // pushes the levels further apart than eps.
        let mut points = Vec::new();
        for c in 0..3 {
            points.push(FeaturePoint {
                row: 0,
                col: c,
                weight: 0.1,
            });
        }
        for c in 0..3 {
            points.push(FeaturePoint {
                row: 1,
                col: c,
                weight: 0.9,
            });
        }
        let spatial = dbscan(&points, 1.5, 3, 0.0);
        assert!(spatial.iter().all(|&l| l == 0));

        let weighted = dbscan(&points, 1.5, 3, 10.0);
        assert_eq!(&weighted[0..3], &[0, 0, 0]);
        assert_eq!(&weighted[3..6], &[1, 1, 1]);
    }
}
