//! Train a nearest-neighbour food model from a labelled image directory
//!
//! Each subdirectory of the dataset is a food label from the nutrition table.

use anyhow::{bail, Context, Result};
use meal_scan::training::train_from_directory;
use meal_scan::{logger, AnalyzerConfig, FeatureExtractor, NutritionTable};
use std::{env, path::Path};

fn main() -> Result<()> {
    logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <dataset_dir> <model.json> [config.json]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} data/food101_subset models/food_knn.json", args[0]);
        bail!("missing arguments");
    }

    let dataset_dir = Path::new(&args[1]);
    let model_path = Path::new(&args[2]);

    let config = match args.get(3) {
        Some(path) => AnalyzerConfig::from_json_file(Path::new(path))
            .with_context(|| format!("loading config {}", path))?,
        None => AnalyzerConfig::default(),
    };

    let table = NutritionTable::load(config.nutrition.override_path.as_deref());
    let extractor = FeatureExtractor::new(&config.features)?;

    let model = train_from_directory(dataset_dir, &extractor, &table, config.classification.k)
        .with_context(|| format!("training from {}", dataset_dir.display()))?;

    if let Some(parent) = model_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    model.save(model_path)?;

    eprintln!("Model saved to {}", model_path.display());
    eprintln!("  Samples: {}", model.sample_count());
    eprintln!("  Feature length: {}", model.feature_len());
    eprintln!("  k: {}", model.k());
    Ok(())
}
