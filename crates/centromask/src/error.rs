//! Error types for mask refinement and sweep orchestration.

use std::path::PathBuf;

// ── Per-sample data integrity ──────────────────────────────────────────────

/// Errors raised while refining one image/pre-mask pair.
///
/// These indicate broken input data for that sample. The batch driver logs
/// them, skips the sample, and continues the sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// A pre-mask centroid lies outside the image bounds.
    CentroidOutOfBounds {
        /// Centroid row.
        row: u32,
        /// Centroid column.
        col: u32,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// Image and pre-mask spatial dimensions differ.
    DimensionMismatch {
        /// Image (width, height).
        image: (u32, u32),
        /// Pre-mask (width, height).
        mask: (u32, u32),
    },
}

impl std::fmt::Display for MaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CentroidOutOfBounds {
                row,
                col,
                width,
                height,
            } => write!(
                f,
                "centroid ({}, {}) outside {}x{} image bounds",
                row, col, width, height
            ),
            Self::DimensionMismatch { image, mask } => write!(
                f,
                "image is {}x{} but pre-mask is {}x{}",
                image.0, image.1, mask.0, mask.1
            ),
        }
    }
}

impl std::error::Error for MaskError {}

// ── Configuration validation ───────────────────────────────────────────────

/// Invalid refinement or sweep parameters.
///
/// Fatal at startup: surfaced before any sample is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Clustering radius must be finite and strictly positive.
    NonPositiveEps {
        /// Offending eps value.
        eps: f32,
    },
    /// Core-point threshold must be at least 1.
    ZeroMinSamples,
    /// A window or core radius of zero selects nothing.
    ZeroRadius {
        /// Name of the offending parameter.
        name: &'static str,
    },
    /// A sweep needs at least one value per parameter axis.
    EmptySweepAxis {
        /// Name of the empty parameter list.
        name: &'static str,
    },
    /// Foreground threshold fraction must lie in [0, 1].
    InvalidForegroundFraction {
        /// Offending fraction.
        frac: f32,
    },
    /// Intensity weight scale must be finite and non-negative.
    InvalidWeightScale {
        /// Offending scale.
        scale: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveEps { eps } => {
                write!(f, "eps must be finite and > 0, got {}", eps)
            }
            Self::ZeroMinSamples => write!(f, "min_samples must be >= 1"),
            Self::ZeroRadius { name } => write!(f, "{} must be >= 1", name),
            Self::EmptySweepAxis { name } => {
                write!(f, "sweep parameter list {} is empty", name)
            }
            Self::InvalidForegroundFraction { frac } => {
                write!(f, "foreground fraction must be in [0, 1], got {}", frac)
            }
            Self::InvalidWeightScale { scale } => {
                write!(f, "weight scale must be finite and >= 0, got {}", scale)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ── Sweep-level failures ───────────────────────────────────────────────────

/// Errors that abort a whole sweep before or during dataset traversal.
///
/// Per-sample failures never surface here; they are recorded in the
/// [`SweepReport`](crate::batch::SweepReport) instead.
#[derive(Debug)]
pub enum SweepError {
    /// Sweep parameters failed validation.
    Config(ConfigError),
    /// The dataset tree could not be enumerated.
    DatasetWalk {
        /// Directory that failed to enumerate.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl std::fmt::Display for SweepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid sweep configuration: {}", e),
            Self::DatasetWalk { path, source } => {
                write!(f, "failed to walk dataset at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::DatasetWalk { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for SweepError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_values() {
        let e = MaskError::CentroidOutOfBounds {
            row: 12,
            col: 99,
            width: 64,
            height: 48,
        };
        let msg = e.to_string();
        assert!(msg.contains("(12, 99)"));
        assert!(msg.contains("64x48"));

        let e = ConfigError::NonPositiveEps { eps: -1.0 };
        assert!(e.to_string().contains("-1"));
    }

    #[test]
    fn config_error_converts_to_sweep_error() {
        let e: SweepError = ConfigError::ZeroMinSamples.into();
        assert!(matches!(e, SweepError::Config(ConfigError::ZeroMinSamples)));
    }
}
