//! Batch CLI for meal_scan
//!
//! Analyzes every supported image in a directory and writes one JSON report
//! per image

use meal_scan::image_loader::is_supported_path;
use meal_scan::{logger, AnalyzerConfig, MealAnalyzer};
use std::{env, fs, path::{Path, PathBuf}, process};

fn main() {
    logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_help(&args[0]);
        process::exit(1);
    }

    let input_dir = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);

    let config = match args.get(3) {
        Some(path) => match AnalyzerConfig::from_json_file(Path::new(path)) {
            Ok(cfg) => {
                eprintln!("Loaded configuration from {}", path);
                cfg
            }
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default(),
    };

    let analyzer = match MealAnalyzer::new(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error building analyzer: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::create_dir_all(output_dir) {
        eprintln!("Error creating output directory: {}", e);
        process::exit(1);
    }

    let image_files = match find_image_files(input_dir) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error finding image files: {}", e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", input_dir.display());
        process::exit(1);
    }

    eprintln!("Found {} image files to process", image_files.len());
    eprintln!();

    let mut success_count = 0;
    let mut error_count = 0;
    let mut meal_calories = 0.0;

    for (i, image_path) in image_files.iter().enumerate() {
        let filename = image_path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        eprint!("[{}/{}] Processing {}... ", i + 1, image_files.len(), filename);

        match analyzer.analyze_path(image_path, None) {
            Ok(report) => {
                let base_name = image_path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let report_path = output_dir.join(format!("{}.json", base_name));

                let written = serde_json::to_string_pretty(&report)
                    .map_err(|e| e.to_string())
                    .and_then(|json| fs::write(&report_path, json).map_err(|e| e.to_string()));
                if let Err(e) = written {
                    eprintln!("Warning saving report: {}", e);
                }

                eprintln!("✓ {} items, {:.1} kcal", report.items.len(), report.total_calories);
                meal_calories += report.total_calories;
                success_count += 1;

                if env::var("VERBOSE").is_ok() {
                    for item in &report.items {
                        eprintln!("  → {}: {:.1} g, {:.1} kcal",
                                 item.label, item.estimated_weight_g, item.estimated_calories);
                    }
                }
            }
            Err(error) => {
                eprintln!("✗ {}", error);
                error_count += 1;
            }
        }
    }

    eprintln!();
    eprintln!("Batch processing complete:");
    eprintln!("  Success: {}", success_count);
    eprintln!("  Errors: {}", error_count);
    eprintln!("  Calories across all images: {:.1} kcal", meal_calories);
    eprintln!("  Reports saved to: {}", output_dir.display());

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <input_dir> <output_dir> [config.json]", program_name);
    eprintln!();
    eprintln!("Analyze every plate photograph in a directory.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  input_dir      Directory (or single file) of images");
    eprintln!("  output_dir     Directory receiving one JSON report per image");
    eprintln!("  config.json    Optional analyzer configuration");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VERBOSE=1      Print every detected item");
    eprintln!("  RUST_LOG=debug Trace each pipeline stage");
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    if dir.is_file() {
        return Ok(vec![dir.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_path(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
