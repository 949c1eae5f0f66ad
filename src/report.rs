//! Analysis output types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::detection::Region;

/// Estimated portion of one detected food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub label: String,
    pub confidence: Option<f32>,
    pub estimated_weight_g: f64,
    pub estimated_calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub source_region: Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Aggregated result of one meal analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MealReport {
    pub total_calories: f64,
    pub nutrient_totals: NutrientTotals,
    pub items: Vec<FoodItem>,
}

impl MealReport {
    /// Fold one item into the totals
    pub fn add_item(&mut self, item: FoodItem) {
        self.total_calories += item.estimated_calories;
        self.nutrient_totals.protein_g += item.protein_g;
        self.nutrient_totals.carbs_g += item.carbs_g;
        self.nutrient_totals.fat_g += item.fat_g;
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<FoodItem> for MealReport {
    fn from_iter<I: IntoIterator<Item = FoodItem>>(iter: I) -> Self {
        iter.into_iter().fold(MealReport::default(), |mut report, item| {
            report.add_item(item);
            report
        })
    }
}

impl fmt::Display for MealReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meal Summary:")?;
        writeln!(f, "  Total calories: {:.1} kcal", self.total_calories)?;
        writeln!(
            f,
            "  Protein: {:.1} g, Carbs: {:.1} g, Fat: {:.1} g",
            self.nutrient_totals.protein_g, self.nutrient_totals.carbs_g, self.nutrient_totals.fat_g
        )?;
        if self.items.is_empty() {
            return writeln!(f, "  No food detected");
        }
        writeln!(f, "  Items ({}):", self.items.len())?;
        for item in &self.items {
            let r = &item.source_region;
            write!(
                f,
                "    - {}: {:.1} g, {:.1} kcal at ({}, {}) {}x{}",
                item.label, item.estimated_weight_g, item.estimated_calories, r.x, r.y, r.width, r.height
            )?;
            if let Some(confidence) = item.confidence {
                write!(f, " [{:.0}%]", confidence * 100.0)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, calories: f64, protein: f64) -> FoodItem {
        FoodItem {
            label: label.to_string(),
            confidence: None,
            estimated_weight_g: 100.0,
            estimated_calories: calories,
            protein_g: protein,
            carbs_g: 1.0,
            fat_g: 0.5,
            source_region: Region::new(0, 0, 10, 10),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = MealReport::default();
        assert_eq!(report.total_calories, 0.0);
        assert_eq!(report.nutrient_totals, NutrientTotals::default());
        assert!(report.is_empty());
        assert!(report.to_string().contains("No food detected"));
    }

    #[test]
    fn test_fold_totals() {
        let report: MealReport = vec![item("apple", 52.0, 0.3), item("rice", 130.0, 2.7)]
            .into_iter()
            .collect();
        assert_eq!(report.items.len(), 2);
        assert!((report.total_calories - 182.0).abs() < 1e-9);
        assert!((report.nutrient_totals.protein_g - 3.0).abs() < 1e-9);
        assert!((report.nutrient_totals.carbs_g - 2.0).abs() < 1e-9);
        assert!((report.nutrient_totals.fat_g - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_lists_items() {
        let mut report = MealReport::default();
        report.add_item(item("apple", 52.0, 0.3));
        let text = report.to_string();
        assert!(text.contains("Total calories: 52.0 kcal"));
        assert!(text.contains("- apple: 100.0 g"));
    }

    #[test]
    fn test_json_serialization() {
        let report: MealReport = vec![item("apple", 52.0, 0.3)].into_iter().collect();
        let json = serde_json::to_string(&report).unwrap();
        let back: MealReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
