//! Dataset tree traversal and output path construction.
//!
//! Layout, shared with the annotation tooling:
//!
//! ```text
//! <base>/img/<split>/<name>.<ext>          intensity images
//! <base>/mask-pre/<split>/<name>.png       centroid pre-masks
//! <base>/mask-dbscan/minsamples_<m>/eps<e>/<split>/<name>.<ext>
//! ```
//!
//! Traversal order is sorted, so sweep runs enumerate samples
//! deterministically.

use std::path::{Path, PathBuf};

use crate::error::SweepError;

const IMG_DIR: &str = "img";
const PREMASK_DIR: &str = "mask-pre";
const OUTPUT_DIR: &str = "mask-dbscan";

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// One image/pre-mask pair discovered in the dataset tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePair {
    /// Path to the intensity image.
    pub image: PathBuf,
    /// Path to the centroid pre-mask.
    pub premask: PathBuf,
    /// Split directory name (e.g. `train`, `test`).
    pub split: String,
    /// Image file name including extension.
    pub file_name: String,
}

/// Enumerate all image/pre-mask pairs under `base_dir`.
///
/// Splits without a matching `mask-pre` folder and images without a
/// matching mask are skipped with a warning, mirroring the lenient
/// traversal of the annotation tooling. Only enumeration of the tree
/// itself can fail.
pub fn enumerate_samples(base_dir: &Path) -> Result<Vec<SamplePair>, SweepError> {
    let img_root = base_dir.join(IMG_DIR);
    let premask_root = base_dir.join(PREMASK_DIR);

    let mut samples = Vec::new();
    for split_dir in sorted_entries(&img_root)? {
        if !split_dir.is_dir() {
            continue;
        }
        let split = match split_dir.file_name().and_then(|n| n.to_str()) {
            Some(s) => s.to_owned(),
            None => continue,
        };
        let mask_folder = premask_root.join(&split);
        if !mask_folder.is_dir() {
            tracing::warn!(%split, "skipping split without a mask-pre folder");
            continue;
        }

        for entry in sorted_entries(&split_dir)? {
            let Some(file_name) = entry.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !has_image_extension(file_name) {
                continue;
            }
            let stem = entry
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name);
            let premask = mask_folder.join(format!("{}.png", stem));
            if !premask.is_file() {
                tracing::warn!(mask = %premask.display(), "mask not found, skipping sample");
                continue;
            }
            samples.push(SamplePair {
                image: entry.clone(),
                premask,
                split: split.clone(),
                file_name: file_name.to_owned(),
            });
        }
    }
    Ok(samples)
}

/// Output path for one sample under one (eps, min_samples) configuration.
pub fn output_path(
    base_dir: &Path,
    eps: f32,
    min_samples: usize,
    split: &str,
    file_name: &str,
) -> PathBuf {
    base_dir
        .join(OUTPUT_DIR)
        .join(format!("minsamples_{}", min_samples))
        .join(format!("eps{}", format_eps(eps)))
        .join(split)
        .join(file_name)
}

/// Render eps for path components: integral values print without a decimal
/// point (`eps55`), fractional values keep their shortest form (`eps1.5`).
pub fn format_eps(eps: f32) -> String {
    format!("{}", eps)
}

fn has_image_extension(file_name: &str) -> bool {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|e| ext.eq_ignore_ascii_case(e))
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SweepError> {
    let read = std::fs::read_dir(dir).map_err(|source| SweepError::DatasetWalk {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| SweepError::DatasetWalk {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
