//! Default parameters and reference values for meal analysis
//!
//! HSV values follow the 8-bit convention used throughout the crate:
//! hue in [0, 180), saturation and value in [0, 255].

/// HSV channel scales
pub mod hsv {
    /// Exclusive upper bound of the hue channel (degrees / 2)
    pub const HUE_RANGE: f32 = 180.0;

    /// Exclusive upper bound of the saturation and value channels
    pub const SAT_VAL_RANGE: f32 = 256.0;

    /// Largest saturation/value sample
    pub const SAT_VAL_MAX: f32 = 255.0;
}

/// Region detection defaults
pub mod detection {
    /// Hue bounds of the food mask (inclusive)
    pub const HUE_MIN: f32 = 0.0;
    pub const HUE_MAX: f32 = 180.0;

    /// Saturation bounds; low saturation is plate, table cloth or background
    pub const SAT_MIN: f32 = 40.0;
    pub const SAT_MAX: f32 = 255.0;

    /// Value bounds; very dark pixels are shadow
    pub const VAL_MIN: f32 = 40.0;
    pub const VAL_MAX: f32 = 255.0;

    /// Minimum bounding box area as fraction of image area
    pub const MIN_AREA_RATIO: f64 = 0.01;

    /// Maximum bounding box area as fraction of image area
    pub const MAX_AREA_RATIO: f64 = 1.0;
}

/// Feature extraction defaults
pub mod features {
    pub const HUE_BINS: usize = 8;
    pub const SAT_BINS: usize = 4;
    pub const VAL_BINS: usize = 4;
    pub const TEXTURE_BINS: usize = 8;

    /// Radius of the local binary pattern sampling circle in pixels
    pub const LBP_RADIUS: u32 = 1;

    /// Neighbour samples per LBP code (one bit each)
    pub const LBP_NEIGHBORS: usize = 8;

    /// Number of distinct LBP codes
    pub const LBP_CODES: usize = 1 << LBP_NEIGHBORS;
}

/// Classification defaults
pub mod classification {
    /// Label returned when no class can be assigned
    pub const UNKNOWN_LABEL: &str = "unknown";

    /// Neighbours consulted by the trained classifier
    pub const DEFAULT_K: usize = 1;
}

/// Portion estimation defaults
pub mod estimation {
    /// Physical area of one pixel when no reference object is available
    pub const CM2_PER_PIXEL: f64 = 0.01;

    /// Assumed height of every food item
    pub const FOOD_HEIGHT_CM: f64 = 3.0;

    /// Density used for labels without nutrition data (water)
    pub const DEFAULT_DENSITY_G_PER_CM3: f64 = 1.0;
}

/// Objects of known physical length usable for scale calibration
pub mod reference_objects {
    /// (name, length in centimetres)
    pub const LENGTHS_CM: &[(&str, f64)] = &[
        ("fork", 19.0),
        ("spoon", 16.0),
        ("knife", 22.0),
        ("credit_card", 8.56),
        ("coin", 2.4),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_ranges() {
        assert!(detection::HUE_MIN < detection::HUE_MAX);
        assert!(detection::SAT_MIN < detection::SAT_MAX);
        assert!(detection::VAL_MIN < detection::VAL_MAX);
        assert!(detection::MIN_AREA_RATIO < detection::MAX_AREA_RATIO);
    }

    #[test]
    fn test_default_feature_length() {
        let len = features::HUE_BINS + features::SAT_BINS + features::VAL_BINS + features::TEXTURE_BINS;
        assert_eq!(len, 24);
        assert_eq!(features::LBP_CODES, 256);
    }

    #[test]
    fn test_reference_lengths_positive() {
        assert!(reference_objects::LENGTHS_CM.iter().all(|(_, cm)| *cm > 0.0));
    }
}
