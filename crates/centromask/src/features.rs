//! Feature-point construction from a window's foreground pixels.
//!
//! Each foreground candidate inside the analysis window becomes one point
//! at its window-local (row, col), carrying its normalized intensity as a
//! weight. The clustering distance is spatial by default; setting a nonzero
//! `weight_scale` adds the intensity as a third feature axis.

use image::GrayImage;

use crate::error::ConfigError;
use crate::window::Window;

/// One clustering point: a window-local pixel with normalized intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePoint {
    /// Window-local row.
    pub row: u32,
    /// Window-local column.
    pub col: u32,
    /// Pixel intensity normalized to [0, 1].
    pub weight: f32,
}

/// Foreground candidate selection policy.
///
/// Deterministic by construction: both policies depend only on the window
/// contents and scan pixels in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ForegroundPolicy {
    /// A pixel is foreground iff its intensity reaches `lo + frac * (hi - lo)`
    /// where lo/hi are the window's min/max intensity. A flat window (hi == lo)
    /// has no intensity structure to cluster and yields no candidates.
    IntensityRange {
        /// Threshold position within the window's intensity range.
        frac: f32,
    },
    /// Foreground candidates are the window's nonzero pre-mask pixels.
    PreMask,
}

/// Configuration for feature-point construction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Candidate selection policy.
    pub policy: ForegroundPolicy,
    /// Scale of the intensity axis in the clustering distance.
    /// 0.0 (default) clusters on spatial coordinates only.
    pub weight_scale: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            policy: ForegroundPolicy::IntensityRange { frac: 0.5 },
            weight_scale: 0.0,
        }
    }
}

impl FeatureConfig {
    /// Validate threshold fraction and weight scale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ForegroundPolicy::IntensityRange { frac } = self.policy {
            if !frac.is_finite() || !(0.0..=1.0).contains(&frac) {
                return Err(ConfigError::InvalidForegroundFraction { frac });
            }
        }
        if !self.weight_scale.is_finite() || self.weight_scale < 0.0 {
            return Err(ConfigError::InvalidWeightScale {
                scale: self.weight_scale,
            });
        }
        Ok(())
    }
}

/// Build the clustering point set for one window.
///
/// Returns points in row-major window scan order. An empty result is the
/// defined outcome for windows with no foreground; downstream stages treat
/// it as "no region for this centroid", not an error.
pub fn build_points(
    image: &GrayImage,
    premask: &GrayImage,
    window: Window,
    config: &FeatureConfig,
) -> Vec<FeaturePoint> {
    match config.policy {
        ForegroundPolicy::IntensityRange { frac } => intensity_range_points(image, window, frac),
        ForegroundPolicy::PreMask => premask_points(image, premask, window),
    }
}

fn intensity_range_points(image: &GrayImage, window: Window, frac: f32) -> Vec<FeaturePoint> {
    let mut lo = u8::MAX;
    let mut hi = u8::MIN;
    for row in window.row_start..window.row_end {
        for col in window.col_start..window.col_end {
            let v = image.get_pixel(col, row)[0];
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if hi <= lo {
        return Vec::new();
    }
    let threshold = lo as f32 + frac * (hi - lo) as f32;

    let mut points = Vec::new();
    for row in window.row_start..window.row_end {
        for col in window.col_start..window.col_end {
            let v = image.get_pixel(col, row)[0];
            if v as f32 >= threshold {
                let (lr, lc) = window.to_local(row, col);
                points.push(FeaturePoint {
                    row: lr,
                    col: lc,
                    weight: v as f32 / 255.0,
                });
            }
        }
    }
    points
}

fn premask_points(image: &GrayImage, premask: &GrayImage, window: Window) -> Vec<FeaturePoint> {
    let mut points = Vec::new();
    for row in window.row_start..window.row_end {
        for col in window.col_start..window.col_end {
            if premask.get_pixel(col, row)[0] == 0 {
                continue;
            }
            let (lr, lc) = window.to_local(row, col);
            points.push(FeaturePoint {
                row: lr,
                col: lc,
                weight: image.get_pixel(col, row)[0] as f32 / 255.0,
            });
        }
    }
    points
}
