//! # Meal Scan
//!
//! A Rust crate for estimating the calories on a plate from a single photograph.
//!
//! The pipeline:
//! - Detects food-like regions by HSV thresholding and contour extraction
//! - Describes each region with color and local-binary-pattern histograms
//! - Classifies regions with a trained nearest-neighbour model, or with
//!   ordered color rules when no model is available
//! - Estimates portion weight from region area and looks up nutrients
//!
//! ## Example
//!
//! ```rust,no_run
//! use meal_scan::{AnalyzerConfig, MealAnalyzer};
//! use std::path::Path;
//!
//! let analyzer = MealAnalyzer::new(&AnalyzerConfig::default())?;
//! let report = analyzer.analyze_path(Path::new("plate.jpg"), None)?;
//! println!("{}", report);
//! # Ok::<(), meal_scan::AnalysisError>(())
//! ```

pub mod error;
pub mod constants;
pub mod config;
pub mod color;
pub mod detection;
pub mod features;
pub mod classification;
pub mod nutrition;
pub mod calibration;
pub mod estimation;
pub mod report;
pub mod analyzer;
pub mod training;
pub mod image_loader;
pub mod logger;

pub use error::{AnalysisError, Result};
pub use config::AnalyzerConfig;
pub use analyzer::MealAnalyzer;
pub use calibration::ReferenceScale;
pub use classification::{Classification, FoodClassifier};
pub use detection::{Region, RegionDetector};
pub use features::{FeatureExtractor, FeatureVector};
pub use nutrition::{NutritionEntry, NutritionTable};
pub use report::{FoodItem, MealReport, NutrientTotals};
