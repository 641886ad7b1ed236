//! Per-sample refinement pipeline: centroid extraction → windowed
//! clustering → region compositing.

use image::GrayImage;

use crate::centroids::extract_centroids;
use crate::composite::{paint, FOREGROUND};
use crate::config::RefineConfig;
use crate::dbscan::dbscan;
use crate::error::MaskError;
use crate::features::build_points;
use crate::select::select_cluster;
use crate::window::Window;

/// Result of refining one image/pre-mask pair.
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    /// The refined binary mask, same dimensions as the input image.
    pub mask: GrayImage,
    /// Number of centroids extracted from the pre-mask.
    pub n_centroids: usize,
    /// Centroids whose selected cluster set at least one pixel not already
    /// painted by an earlier centroid. A centroid whose region is entirely
    /// covered by a previous region does not count, even though it selected
    /// a cluster; the merged mask is unaffected either way.
    pub n_painted_regions: usize,
    /// Whether the pre-mask was returned because refinement painted nothing.
    pub used_fallback: bool,
}

/// Refine one pre-mask against its intensity image.
///
/// Centroids are processed in ascending (row, col) order; each one runs the
/// window → features → cluster → select → paint sequence, accumulating into
/// a single output mask with OR semantics. Centroids whose window has no
/// foreground or whose points are all noise contribute no region, which is
/// a defined no-op rather than an error.
///
/// When no centroid paints anything the pre-mask itself is returned
/// (binarized to the foreground value), mirroring the annotation tool's
/// empty-result fallback, and `used_fallback` is set.
pub fn refine_mask(
    image: &GrayImage,
    premask: &GrayImage,
    config: &RefineConfig,
) -> Result<RefineOutcome, MaskError> {
    let dims = image.dimensions();
    if dims != premask.dimensions() {
        return Err(MaskError::DimensionMismatch {
            image: dims,
            mask: premask.dimensions(),
        });
    }

    let centroids = extract_centroids(premask);
    let mut output = GrayImage::new(dims.0, dims.1);
    let mut n_painted_regions = 0usize;
    let mut total_painted = 0usize;

    for &centroid in &centroids {
        let window = Window::extract(dims, centroid, config.window_radius)?;
        let points = build_points(image, premask, window, &config.features);
        if points.is_empty() {
            tracing::trace!(?centroid, "window has no foreground candidates");
            continue;
        }
        let labels = dbscan(
            &points,
            config.eps,
            config.min_samples,
            config.features.weight_scale,
        );
        let Some(chosen) = select_cluster(&points, &labels, centroid, window) else {
            tracing::trace!(?centroid, "all window points labeled noise");
            continue;
        };
        let painted = paint(
            &mut output,
            &points,
            &labels,
            chosen,
            window,
            centroid,
            config.core_radius,
        );
        total_painted += painted;
        if painted > 0 {
            n_painted_regions += 1;
        }
    }

    let used_fallback = total_painted == 0 && !centroids.is_empty();
    if used_fallback {
        tracing::warn!(
            n_centroids = centroids.len(),
            "refinement painted nothing; falling back to the pre-mask"
        );
        for (x, y, p) in premask.enumerate_pixels() {
            if p[0] != 0 {
                output.put_pixel(x, y, image::Luma([FOREGROUND]));
            }
        }
    }

    Ok(RefineOutcome {
        mask: output,
        n_centroids: centroids.len(),
        n_painted_regions,
        used_fallback,
    })
}
