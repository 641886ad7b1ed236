//! centromask — centroid-guided regional clustering for infrared
//! small-target mask refinement.
//!
//! Takes an intensity image plus a "pre-mask" of sparse annotated centroid
//! pixels and expands each centroid into a spatially coherent region. The
//! per-centroid pipeline stages are:
//!
//! 1. **Window** – square analysis window around the centroid, clipped to
//!    the image.
//! 2. **Features** – foreground candidates in the window become clustering
//!    points at their (row, col) positions.
//! 3. **Cluster** – DBSCAN labeling over the point set.
//! 4. **Select** – pick the cluster containing the centroid, else the one
//!    nearest to it.
//! 5. **Composite** – paint the selected cluster within `core_radius` into
//!    the output mask with OR semantics.
//!
//! [`refine_mask`] runs the stages for every centroid of one sample;
//! [`run_sweep`] batches that over a dataset tree for a grid of
//! (eps, min_samples) configurations.

pub mod batch;
pub mod centroids;
pub mod composite;
pub mod config;
pub mod dataset;
pub mod dbscan;
pub mod error;
pub mod features;
pub mod refine;
pub mod select;
pub mod window;

#[cfg(test)]
mod test_utils;

pub use batch::{run_sweep, ConfigReport, SampleFailure, SweepReport};
pub use centroids::extract_centroids;
pub use composite::{paint, FOREGROUND};
pub use config::{RefineConfig, SweepConfig};
pub use dbscan::{dbscan, NOISE};
pub use error::{ConfigError, MaskError, SweepError};
pub use features::{build_points, FeatureConfig, FeaturePoint, ForegroundPolicy};
pub use refine::{refine_mask, RefineOutcome};
pub use select::select_cluster;
pub use window::Window;
