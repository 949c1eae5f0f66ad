//! Color analysis and conversion module
//!
//! This module handles RGB to HSV conversion and statistical summaries
//! (means, histograms) of HSV pixel sets.

pub mod conversion;
pub mod analysis;

pub use conversion::{ColorConverter, HsvPixel};
pub use analysis::{ColorAnalyzer, HsvChannel};
