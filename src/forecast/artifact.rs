use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{MealContext, MealType};

/// Single-row feature tuple fed to a forecast artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRow {
    pub meal_type: MealType,
    /// Monday = 0 through Sunday = 6.
    pub day_of_week: u8,
    pub total_students: u32,
}

impl FeatureRow {
    pub fn from_context(ctx: &MealContext, total_students: u32) -> Self {
        Self {
            meal_type: ctx.meal_type,
            day_of_week: ctx.day_of_week(),
            total_students,
        }
    }
}

/// A fitted regression from meal features to expected attendance.
///
/// Implementations are read-only after construction and shared across threads.
pub trait AttendanceModel: Send + Sync {
    /// Predicted attendance for one row.
    fn predict(&self, row: &FeatureRow) -> f64;

    /// Short model name for logging.
    fn name(&self) -> &str;
}

/// Attendance ratio fitted for one (meal type, weekday) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub meal_type: MealType,
    pub day_of_week: u8,
    /// Least-squares slope of attendance over roster size.
    pub ratio: f64,
    pub samples: usize,
}

/// Per-cell attendance ratio table.
///
/// `predict = ratio(meal_type, day_of_week) × total_students`; rows with no
/// fitted cell use `default_ratio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceTable {
    pub default_ratio: f64,
    pub cells: Vec<TableCell>,
}

impl AttendanceTable {
    /// Ratio used for a given row.
    pub fn ratio_for(&self, meal_type: MealType, day_of_week: u8) -> f64 {
        self.cells
            .iter()
            .find(|c| c.meal_type == meal_type && c.day_of_week == day_of_week)
            .map(|c| c.ratio)
            .unwrap_or(self.default_ratio)
    }
}

impl AttendanceModel for AttendanceTable {
    fn predict(&self, row: &FeatureRow) -> f64 {
        self.ratio_for(row.meal_type, row.day_of_week) * row.total_students as f64
    }

    fn name(&self) -> &str {
        "attendance-table"
    }
}

/// Load an attendance table artifact from JSON.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<AttendanceTable> {
    let content = fs::read_to_string(path)?;
    let table: AttendanceTable = serde_json::from_str(&content)?;
    Ok(table)
}

/// Write an attendance table artifact as pretty JSON.
pub fn save_model<P: AsRef<Path>>(path: P, table: &AttendanceTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_table() -> AttendanceTable {
        AttendanceTable {
            default_ratio: 0.8,
            cells: vec![
                TableCell {
                    meal_type: MealType::Lunch,
                    day_of_week: 0,
                    ratio: 0.9,
                    samples: 100,
                },
                TableCell {
                    meal_type: MealType::Dinner,
                    day_of_week: 6,
                    ratio: 0.65,
                    samples: 100,
                },
            ],
        }
    }

    #[test]
    fn test_predict_uses_cell_ratio() {
        let table = sample_table();
        let row = FeatureRow {
            meal_type: MealType::Lunch,
            day_of_week: 0,
            total_students: 2000,
        };
        assert!((table.predict(&row) - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_meal_type_selects_cell() {
        let table = sample_table();
        let row = |meal_type| FeatureRow {
            meal_type,
            day_of_week: 6,
            total_students: 1000,
        };
        assert!((table.predict(&row(MealType::Dinner)) - 650.0).abs() < 1e-9);
        assert!((table.predict(&row(MealType::Lunch)) - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_falls_back_to_default_ratio() {
        let table = sample_table();
        let row = FeatureRow {
            meal_type: MealType::Breakfast,
            day_of_week: 3,
            total_students: 1000,
        };
        assert!((table.predict(&row) - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "default_ratio": 0.75,
            "cells": [{"meal_type": "Lunch", "day_of_week": 2, "ratio": 0.85, "samples": 10}]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let table = load_model(file.path()).unwrap();
        assert_eq!(table.cells.len(), 1);
        assert_eq!(table.ratio_for(MealType::Lunch, 2), 0.85);
        assert_eq!(table.ratio_for(MealType::Lunch, 3), 0.75);
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        save_model(file.path(), &sample_table()).unwrap();
        assert_eq!(load_model(file.path()).unwrap(), sample_table());
    }

    #[test]
    fn test_load_missing_or_corrupt_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_model(dir.path().join("missing.json")).is_err());

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\x00\x01 not a model").unwrap();
        assert!(load_model(file.path()).is_err());
    }
}
