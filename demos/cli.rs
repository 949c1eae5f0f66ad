//! Command-line interface for meal_scan
//!
//! Analyzes one plate photograph and prints the meal report

use meal_scan::{logger, AnalyzerConfig, MealAnalyzer, MealReport, ReferenceScale};
use std::{env, path::Path, process};

fn main() {
    logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut reference = None;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a path");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--reference" => {
                if i + 2 >= args.len() {
                    eprintln!("Error: --reference requires NAME and PIXELS");
                    process::exit(1);
                }
                let pixels: f64 = match args[i + 2].parse() {
                    Ok(p) => p,
                    Err(_) => {
                        eprintln!("Error: '{}' is not a pixel length", args[i + 2]);
                        process::exit(1);
                    }
                };
                reference = Some((args[i + 1].clone(), pixels));
                i += 2;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };
    let image_path = Path::new(&image_path_str);

    let config = match config_path {
        Some(path) => match AnalyzerConfig::from_json_file(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default(),
    };

    let scale = match reference {
        Some((name, pixels)) => match ReferenceScale::from_object(&name, pixels) {
            Ok(scale) => Some(scale),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let analyzer = match MealAnalyzer::new(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error building analyzer: {}", e);
            process::exit(1);
        }
    };

    match analyzer.analyze_path(image_path, scale.as_ref()) {
        Ok(report) => print_report(&report),
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            if error.is_recoverable() {
                eprintln!("Suggestion: {}", error.user_message());
            }
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Estimate the calories on a plate from a photograph.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE              Analyzer configuration (JSON)");
    eprintln!("  --reference NAME PIXELS    Calibrate with a reference object of known size");
    eprintln!(
        "                             NAME is one of: {}",
        meal_scan::calibration::reference_object_names()
            .collect::<Vec<_>>()
            .join(", ")
    );
    eprintln!("  --help, -h                 Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} plate.jpg", program_name);
    eprintln!("  {} --reference fork 420 plate.jpg", program_name);
    eprintln!("  {} --config meal.json plate.png", program_name);
}

fn print_report(report: &MealReport) {
    // JSON on stdout for programmatic use
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }

    // Summary on stderr for human reading
    eprintln!();
    eprint!("{}", report);
}
