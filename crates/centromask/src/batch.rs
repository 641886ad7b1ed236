//! Sweep orchestration: run the refinement pipeline over every sample of a
//! dataset for every (eps, min_samples) configuration.
//!
//! Per-sample failures (unreadable files, dimension mismatches,
//! out-of-bounds centroids, write errors) are logged and recorded in the
//! report; they never abort the sweep. Configuration errors abort before
//! any sample is touched.

use std::path::PathBuf;

use image::GrayImage;

use crate::config::SweepConfig;
use crate::dataset::{enumerate_samples, output_path, SamplePair};
use crate::error::SweepError;
use crate::refine::refine_mask;

/// One sample that could not be processed, with the reason.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SampleFailure {
    /// Image path of the failed sample.
    pub image: PathBuf,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Per-configuration outcome counts.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConfigReport {
    /// DBSCAN eps for this configuration.
    pub eps: f32,
    /// DBSCAN min_samples for this configuration.
    pub min_samples: usize,
    /// Samples refined and written.
    pub processed: usize,
    /// Samples skipped due to failures.
    pub skipped: usize,
    /// Processed samples that fell back to the pre-mask.
    pub fallback: usize,
    /// The failures behind `skipped`.
    pub failures: Vec<SampleFailure>,
}

/// End-of-run summary across all configurations.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepReport {
    /// Number of samples discovered in the dataset tree.
    pub n_samples: usize,
    /// One entry per (min_samples, eps) pair, in sweep order.
    pub configs: Vec<ConfigReport>,
}

/// Run the full parameter sweep described by `config`.
///
/// Iterates min_samples in the outer loop and eps in the inner loop, the
/// order the output tree is organized in. Returns the report; per-sample
/// problems are inside it, not in the error channel.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport, SweepError> {
    config.validate()?;
    let samples = enumerate_samples(&config.base_dir)?;
    tracing::info!(
        n_samples = samples.len(),
        base_dir = %config.base_dir.display(),
        "starting sweep"
    );

    let mut configs = Vec::new();
    for &min_samples in &config.min_samples_values {
        for &eps in &config.eps_values {
            let report = run_one_config(config, eps, min_samples, &samples);
            tracing::info!(
                eps,
                min_samples,
                processed = report.processed,
                skipped = report.skipped,
                fallback = report.fallback,
                "configuration finished"
            );
            configs.push(report);
        }
    }

    Ok(SweepReport {
        n_samples: samples.len(),
        configs,
    })
}

fn run_one_config(
    config: &SweepConfig,
    eps: f32,
    min_samples: usize,
    samples: &[SamplePair],
) -> ConfigReport {
    let refine_config = config.refine_config(eps, min_samples);
    let mut report = ConfigReport {
        eps,
        min_samples,
        processed: 0,
        skipped: 0,
        fallback: 0,
        failures: Vec::new(),
    };

    for sample in samples {
        match process_sample(config, &refine_config, eps, min_samples, sample) {
            Ok(used_fallback) => {
                report.processed += 1;
                if used_fallback {
                    report.fallback += 1;
                }
            }
            Err(reason) => {
                tracing::warn!(image = %sample.image.display(), %reason, "sample skipped");
                report.skipped += 1;
                report.failures.push(SampleFailure {
                    image: sample.image.clone(),
                    reason,
                });
            }
        }
    }
    report
}

/// Load, refine, and persist one sample; returns whether the pre-mask
/// fallback was used. All failure modes collapse into a reason string for
/// the report.
fn process_sample(
    config: &SweepConfig,
    refine_config: &crate::config::RefineConfig,
    eps: f32,
    min_samples: usize,
    sample: &SamplePair,
) -> Result<bool, String> {
    let image = load_gray(&sample.image)?;
    let premask = load_gray(&sample.premask)?;

    let outcome = refine_mask(&image, &premask, refine_config).map_err(|e| e.to_string())?;
    tracing::debug!(
        image = %sample.image.display(),
        n_centroids = outcome.n_centroids,
        n_painted = outcome.n_painted_regions,
        "sample refined"
    );

    let out = output_path(
        &config.base_dir,
        eps,
        min_samples,
        &sample.split,
        &sample.file_name,
    );
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
    }
    outcome
        .mask
        .save(&out)
        .map_err(|e| format!("failed to write {}: {}", out.display(), e))?;
    Ok(outcome.used_fallback)
}

fn load_gray(path: &std::path::Path) -> Result<GrayImage, String> {
    image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))
}
