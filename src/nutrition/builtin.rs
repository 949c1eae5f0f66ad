//! Built-in nutrition values
//!
//! Per-100g rates follow common food composition tables; densities are rough
//! bulk densities of a typical serving.

use super::NutritionEntry;

/// (label, entry); entry fields are calories, protein, carbs, fat, density
pub const ENTRIES: &[(&str, NutritionEntry)] = &[
    ("apple", NutritionEntry::new(52.0, 0.3, 14.0, 0.2, 0.85)),
    ("banana", NutritionEntry::new(89.0, 1.1, 23.0, 0.3, 0.94)),
    ("bread", NutritionEntry::new(265.0, 9.0, 49.0, 3.2, 0.25)),
    ("broccoli", NutritionEntry::new(34.0, 2.8, 7.0, 0.4, 0.35)),
    ("carrot", NutritionEntry::new(41.0, 0.9, 10.0, 0.2, 0.64)),
    ("chicken", NutritionEntry::new(165.0, 31.0, 0.0, 3.6, 1.05)),
    ("orange", NutritionEntry::new(47.0, 0.9, 12.0, 0.1, 0.87)),
    ("pizza", NutritionEntry::new(266.0, 11.0, 33.0, 10.0, 0.70)),
    ("rice", NutritionEntry::new(130.0, 2.7, 28.0, 0.3, 0.85)),
    ("salad", NutritionEntry::new(15.0, 1.4, 2.9, 0.2, 0.30)),
];
