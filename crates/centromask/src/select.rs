//! Picking the cluster that corresponds to the annotated centroid.

use crate::dbscan::NOISE;
use crate::features::FeaturePoint;
use crate::window::Window;

/// Choose the cluster label for `centroid` among the window's labeled points.
///
/// Precedence: a point exactly at the centroid's window-local position with
/// a non-noise label wins outright; otherwise the non-noise point nearest to
/// the centroid decides, ties broken by the smaller cluster id. Returns
/// `None` when the point set is empty or entirely noise — the documented
/// no-region outcome for this centroid, not an error.
pub fn select_cluster(
    points: &[FeaturePoint],
    labels: &[i32],
    centroid: (u32, u32),
    window: Window,
) -> Option<i32> {
    debug_assert_eq!(points.len(), labels.len());
    let (crow, ccol) = window.to_local(centroid.0, centroid.1);

    let mut best: Option<(f32, i32)> = None;
    for (p, &label) in points.iter().zip(labels) {
        if label == NOISE {
            continue;
        }
        if p.row == crow && p.col == ccol {
            return Some(label);
        }
        let dr = p.row as f32 - crow as f32;
        let dc = p.col as f32 - ccol as f32;
        let dist_sq = dr * dr + dc * dc;
        let better = match best {
            None => true,
            Some((best_dist, best_label)) => {
                dist_sq < best_dist || (dist_sq == best_dist && label < best_label)
            }
        };
        if better {
            best = Some((dist_sq, label));
        }
    }
    best.map(|(_, label)| label)
}
