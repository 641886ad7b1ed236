//! Refinement and sweep configuration.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::features::FeatureConfig;

/// Parameters for refining one image/pre-mask pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// DBSCAN neighborhood radius.
    pub eps: f32,
    /// Minimum neighborhood size (self included) for core-point status.
    pub min_samples: usize,
    /// Half-width of the analysis window around each centroid.
    pub window_radius: u32,
    /// Maximum Euclidean distance from the centroid at which cluster pixels
    /// are painted. Independent of `window_radius`; both apply.
    pub core_radius: u32,
    /// Foreground candidate selection.
    pub features: FeatureConfig,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            eps: 1.5,
            min_samples: 3,
            window_radius: 10,
            core_radius: 4,
            features: FeatureConfig::default(),
        }
    }
}

impl RefineConfig {
    /// Validate all parameters; fatal before any processing starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_eps(self.eps)?;
        validate_min_samples(self.min_samples)?;
        validate_radii(self.window_radius, self.core_radius)?;
        self.features.validate()
    }
}

/// Parameter sweep over a dataset tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepConfig {
    /// Dataset root: contains `img/<split>/` and `mask-pre/<split>/`.
    pub base_dir: PathBuf,
    /// Ordered eps values to sweep.
    pub eps_values: Vec<f32>,
    /// Ordered min_samples values to sweep.
    pub min_samples_values: Vec<usize>,
    /// Analysis window half-width, shared by all configurations.
    pub window_radius: u32,
    /// Paint radius around each centroid, shared by all configurations.
    pub core_radius: u32,
    /// Foreground candidate selection, shared by all configurations.
    #[serde(default)]
    pub features: FeatureConfig,
}

impl SweepConfig {
    /// Validate the sweep axes and shared parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eps_values.is_empty() {
            return Err(ConfigError::EmptySweepAxis { name: "eps_values" });
        }
        if self.min_samples_values.is_empty() {
            return Err(ConfigError::EmptySweepAxis {
                name: "min_samples_values",
            });
        }
        for &eps in &self.eps_values {
            validate_eps(eps)?;
        }
        for &m in &self.min_samples_values {
            validate_min_samples(m)?;
        }
        validate_radii(self.window_radius, self.core_radius)?;
        self.features.validate()
    }

    /// The per-sample configuration for one (eps, min_samples) point.
    pub fn refine_config(&self, eps: f32, min_samples: usize) -> RefineConfig {
        RefineConfig {
            eps,
            min_samples,
            window_radius: self.window_radius,
            core_radius: self.core_radius,
            features: self.features,
        }
    }
}

fn validate_eps(eps: f32) -> Result<(), ConfigError> {
    if !eps.is_finite() || eps <= 0.0 {
        return Err(ConfigError::NonPositiveEps { eps });
    }
    Ok(())
}

fn validate_min_samples(min_samples: usize) -> Result<(), ConfigError> {
    if min_samples < 1 {
        return Err(ConfigError::ZeroMinSamples);
    }
    Ok(())
}

fn validate_radii(window_radius: u32, core_radius: u32) -> Result<(), ConfigError> {
    if window_radius < 1 {
        return Err(ConfigError::ZeroRadius {
            name: "window_radius",
        });
    }
    if core_radius < 1 {
        return Err(ConfigError::ZeroRadius { name: "core_radius" });
    }
    Ok(())
}
