//! Food region detection module
//!
//! This module isolates candidate food regions within plate images.

pub mod region;

pub use region::{Region, RegionDetector};
