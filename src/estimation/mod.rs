//! Portion and nutrition estimation
//!
//! Pixel area → physical area → volume (constant food height) → mass
//! (label density) → nutrients (per-100g rates). A rough heuristic: there is
//! no perspective correction or depth sensing.

use crate::calibration::ReferenceScale;
use crate::classification::Classification;
use crate::config::EstimationConfig;
use crate::detection::Region;
use crate::nutrition::NutritionTable;
use crate::report::FoodItem;

#[derive(Debug, Clone)]
pub struct PortionEstimator {
    cm2_per_pixel: f64,
    food_height_cm: f64,
    default_density: f64,
}

impl Default for PortionEstimator {
    fn default() -> Self {
        Self::from_config(&EstimationConfig::default())
    }
}

impl PortionEstimator {
    pub fn from_config(config: &EstimationConfig) -> Self {
        Self {
            cm2_per_pixel: config.cm2_per_pixel,
            food_height_cm: config.food_height_cm,
            default_density: config.default_density_g_per_cm3,
        }
    }

    /// Physical area of `region`, calibrated when a scale is available
    pub fn area_cm2(&self, region: &Region, scale: Option<&ReferenceScale>) -> f64 {
        let pixel_area = region.area() as f64;
        match scale {
            Some(scale) => scale.area_cm2(pixel_area),
            None => pixel_area * self.cm2_per_pixel,
        }
    }

    /// Estimate weight and nutrients of one classified region.
    ///
    /// Unknown classifications and labels missing from `table` use the
    /// default density and contribute no calories or nutrients.
    pub fn estimate(
        &self,
        region: &Region,
        classification: &Classification,
        table: &NutritionTable,
        scale: Option<&ReferenceScale>,
    ) -> FoodItem {
        let entry = if classification.is_unknown() {
            None
        } else {
            table.get(&classification.label)
        };
        let density = entry.map_or(self.default_density, |e| e.density_g_per_cm3);

        let volume_cm3 = self.area_cm2(region, scale) * self.food_height_cm;
        let weight_g = volume_cm3 * density;
        let per_100g = |rate: f64| weight_g * rate / 100.0;

        FoodItem {
            label: classification.label.clone(),
            confidence: classification.confidence,
            estimated_weight_g: weight_g,
            estimated_calories: entry.map_or(0.0, |e| per_100g(e.calories_per_100g)),
            protein_g: entry.map_or(0.0, |e| per_100g(e.protein_per_100g)),
            carbs_g: entry.map_or(0.0, |e| per_100g(e.carbs_per_100g)),
            fat_g: entry.map_or(0.0, |e| per_100g(e.fat_per_100g)),
            source_region: *region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> Classification {
        Classification::new("apple", None)
    }

    #[test]
    fn test_uncalibrated_estimate() {
        let table = NutritionTable::builtin();
        let item = PortionEstimator::default().estimate(&Region::new(0, 0, 30, 30), &apple(), &table, None);
        // 900 px * 0.01 cm2 * 3 cm * 0.85 g/cm3
        assert!((item.estimated_weight_g - 22.95).abs() < 1e-9);
        assert!((item.estimated_calories - 22.95 * 0.52).abs() < 1e-9);
        assert!((item.carbs_g - 22.95 * 0.14).abs() < 1e-9);
        assert_eq!(item.source_region, Region::new(0, 0, 30, 30));
    }

    #[test]
    fn test_calibrated_estimate() {
        let table = NutritionTable::builtin();
        let estimator = PortionEstimator::default();
        let region = Region::new(0, 0, 40, 20);
        // 20 px/cm: 800 px -> 2 cm2
        let scale = ReferenceScale::new(20.0).unwrap();
        assert!((estimator.area_cm2(&region, Some(&scale)) - 2.0).abs() < 1e-9);

        let item = estimator.estimate(&region, &apple(), &table, Some(&scale));
        assert!((item.estimated_weight_g - 2.0 * 3.0 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_label_has_no_calories() {
        let table = NutritionTable::builtin();
        let item = PortionEstimator::default().estimate(
            &Region::new(0, 0, 10, 10),
            &Classification::unknown(),
            &table,
            None,
        );
        // 100 px * 0.01 * 3 * 1.0
        assert!((item.estimated_weight_g - 3.0).abs() < 1e-9);
        assert_eq!(item.estimated_calories, 0.0);
        assert_eq!(item.protein_g + item.carbs_g + item.fat_g, 0.0);
    }

    #[test]
    fn test_unknown_ignores_table_entry_of_same_name() {
        let mut table = NutritionTable::builtin();
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert(
            "unknown".to_string(),
            crate::nutrition::NutritionEntry::new(500.0, 10.0, 50.0, 20.0, 2.0),
        );
        table.merge(overrides);

        let item = PortionEstimator::default().estimate(
            &Region::new(0, 0, 10, 10),
            &Classification::unknown(),
            &table,
            None,
        );
        assert!((item.estimated_weight_g - 3.0).abs() < 1e-9);
        assert_eq!(item.estimated_calories, 0.0);
        assert_eq!(item.fat_g, 0.0);
    }

    #[test]
    fn test_monotonic_in_area() {
        let table = NutritionTable::builtin();
        let estimator = PortionEstimator::default();
        let label = Classification::new("bread", None);
        let mut last = (0.0, 0.0);
        let base = Region::new(3, 3, 4, 6);
        for factor in [1.0, 1.3, 2.0, 7.5, 8.0, 60.0] {
            let item = estimator.estimate(&base.scaled(factor), &label, &table, None);
            assert!(item.estimated_weight_g >= last.0);
            assert!(item.estimated_calories >= last.1);
            last = (item.estimated_weight_g, item.estimated_calories);
        }
    }
}
