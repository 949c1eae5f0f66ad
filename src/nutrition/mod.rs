//! Nutrition reference data
//!
//! The [`NutritionTable`] maps food labels to per-100g nutrient rates and a
//! density. It is built once from the built-in data, optionally merged with an
//! override file, and passed by reference to the classifier and estimator.

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::estimation::DEFAULT_DENSITY_G_PER_CM3;
use crate::{AnalysisError, Result};

/// Static per-food nutrient record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
    #[serde(default = "default_density")]
    pub density_g_per_cm3: f64,
}

fn default_density() -> f64 {
    DEFAULT_DENSITY_G_PER_CM3
}

impl NutritionEntry {
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64, density: f64) -> Self {
        Self {
            calories_per_100g: calories,
            protein_per_100g: protein,
            carbs_per_100g: carbs,
            fat_per_100g: fat,
            density_g_per_cm3: density,
        }
    }
}

/// Label-keyed nutrition data in sorted key order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionTable {
    entries: BTreeMap<String, NutritionEntry>,
}

impl NutritionTable {
    pub fn new(entries: BTreeMap<String, NutritionEntry>) -> Self {
        Self { entries }
    }

    /// Built-in table
    pub fn builtin() -> Self {
        let entries = builtin::ENTRIES
            .iter()
            .map(|(label, entry)| (label.to_string(), *entry))
            .collect();
        Self { entries }
    }

    /// Built-in table merged with the override file at `path`, if any.
    ///
    /// A missing or malformed override file is logged and ignored.
    pub fn load(override_path: Option<&Path>) -> Self {
        let mut table = Self::builtin();
        let Some(path) = override_path else {
            return table;
        };

        match Self::read_overrides(path) {
            Ok(overrides) => {
                debug!(path = %path.display(), entries = overrides.len(), "merging nutrition overrides");
                table.merge(overrides);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring nutrition override file");
            }
        }
        table
    }

    /// Parse an override file of the form `{label: NutritionEntry}`
    pub fn read_overrides(path: &Path) -> Result<BTreeMap<String, NutritionEntry>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}", path.display()), e)
        })
    }

    /// Shallow merge: overriding labels replace whole entries
    pub fn merge(&mut self, overrides: BTreeMap<String, NutritionEntry>) {
        self.entries.extend(overrides);
    }

    pub fn get(&self, label: &str) -> Option<&NutritionEntry> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Labels in table key order; class indices of trained models refer to it
    pub fn labels(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.entries.keys().position(|k| k == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_contains_apple() {
        let table = NutritionTable::builtin();
        let apple = table.get("apple").unwrap();
        assert_eq!(apple.calories_per_100g, 52.0);
        assert!(!table.contains("kiwi"));
    }

    #[test]
    fn test_labels_sorted() {
        let labels = NutritionTable::builtin().labels();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
        assert_eq!(NutritionTable::builtin().index_of(&labels[2]), Some(2));
    }

    #[test]
    fn test_override_adds_and_replaces() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "kiwi": {{"calories_per_100g": 61, "protein_per_100g": 1.1, "carbs_per_100g": 15, "fat_per_100g": 0.5}},
                "rice": {{"calories_per_100g": 111, "protein_per_100g": 2.6, "carbs_per_100g": 23, "fat_per_100g": 0.9, "density_g_per_cm3": 0.9}}
            }}"#
        )
        .unwrap();

        let builtin = NutritionTable::builtin();
        let table = NutritionTable::load(Some(file.path()));

        let kiwi = table.get("kiwi").unwrap();
        assert_eq!(kiwi.calories_per_100g, 61.0);
        assert_eq!(kiwi.density_g_per_cm3, DEFAULT_DENSITY_G_PER_CM3);
        assert_eq!(table.get("rice").unwrap().calories_per_100g, 111.0);
        assert_eq!(table.get("apple"), builtin.get("apple"));
        assert_eq!(table.len(), builtin.len() + 1);
    }

    #[test]
    fn test_missing_override_ignored() {
        let table = NutritionTable::load(Some(Path::new("/nonexistent/nutrition.json")));
        assert_eq!(table, NutritionTable::builtin());
    }

    #[test]
    fn test_malformed_override_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let table = NutritionTable::load(Some(file.path()));
        assert_eq!(table, NutritionTable::builtin());
    }
}
