//! Physical scale calibration module
//!
//! This module converts pixel measurements into physical units using
//! reference objects of known size.

pub mod reference;

pub use reference::{reference_length_cm, reference_object_names, ReferenceScale};
