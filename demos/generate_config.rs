//! Generate the default analyzer configuration file
//!
//! Creates a JSON config with all default parameters

use meal_scan::AnalyzerConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} configs/meal.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = AnalyzerConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Region detection: HSV {:?}-{:?}, area {:.0}%-{:.0}%",
                     config.region_detection.hsv_min,
                     config.region_detection.hsv_max,
                     config.region_detection.min_area_ratio * 100.0,
                     config.region_detection.max_area_ratio * 100.0);
            eprintln!("  Features: {} values (hue {}, sat {}, val {}, texture {}), LBP radius {}",
                     config.features.feature_len(),
                     config.features.hue_bins,
                     config.features.sat_bins,
                     config.features.val_bins,
                     config.features.texture_bins,
                     config.features.lbp_radius);
            eprintln!("  Classification: k = {}, model {}",
                     config.classification.k,
                     config.classification.model_path
                         .as_ref()
                         .map(|p| p.display().to_string())
                         .unwrap_or_else(|| "none (color rules)".to_string()));
            eprintln!("  Estimation: {} cm²/px, height {} cm, density {} g/cm³",
                     config.estimation.cm2_per_pixel,
                     config.estimation.food_height_cm,
                     config.estimation.default_density_g_per_cm3);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
