//! Training a nearest-neighbour model from a labelled image directory
//!
//! Expected layout: one subdirectory per food label, each holding example
//! images of that food. The whole image is used as the region.
//!
//! ```text
//! dataset/
//!   apple/   a1.jpg a2.png ...
//!   rice/    r1.jpg ...
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::classification::{KnnModel, TrainingSample};
use crate::features::FeatureExtractor;
use crate::image_loader::{is_supported_path, load_image};
use crate::nutrition::NutritionTable;
use crate::{AnalysisError, Result};

/// Build a model from `dataset_dir`.
///
/// Subdirectories whose name is not a table label, and files that fail to
/// decode, are skipped with a warning.
pub fn train_from_directory(
    dataset_dir: &Path,
    extractor: &FeatureExtractor,
    table: &NutritionTable,
    k: usize,
) -> Result<KnnModel> {
    let mut samples = Vec::new();

    for class_dir in sorted_entries(dataset_dir)? {
        if !class_dir.is_dir() {
            continue;
        }
        let Some(label) = class_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(class_index) = table.index_of(label) else {
            warn!(label, "skipping class without nutrition entry");
            continue;
        };

        let mut class_count = 0usize;
        for file in sorted_entries(&class_dir)? {
            if !file.is_file() || !is_supported_path(&file) {
                continue;
            }
            match load_image(&file) {
                Ok(image) => {
                    samples.push(TrainingSample {
                        features: extractor.extract(&image),
                        class_index,
                    });
                    class_count += 1;
                }
                Err(e) => warn!(path = %file.display(), error = %e, "skipping unreadable image"),
            }
        }
        debug!(label, samples = class_count, "class loaded");
    }

    if samples.is_empty() {
        return Err(AnalysisError::invalid_parameter(
            "dataset_dir",
            format!("{} contains no usable labelled images", dataset_dir.display()),
        ));
    }

    info!(samples = samples.len(), k, "fitting nearest-neighbour model");
    KnnModel::fit(samples, k)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        AnalysisError::input_unavailable(format!("Failed to list {}", dir.display()), e)
    })?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| AnalysisError::input_unavailable(format!("Failed to list {}", dir.display()), e))?;
    paths.sort();
    Ok(paths)
}
