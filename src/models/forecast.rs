use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ingredient name to estimated quantity in kilograms.
pub type PrepSheet = BTreeMap<String, f64>;

/// Which strategy produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelStatus {
    #[serde(rename = "Loaded and Operational")]
    Loaded,
    #[serde(rename = "Not Loaded")]
    NotLoaded,
    #[serde(rename = "Mock")]
    Mock,
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelStatus::Loaded => f.write_str("Loaded and Operational"),
            ModelStatus::NotLoaded => f.write_str("Not Loaded"),
            ModelStatus::Mock => f.write_str("Mock"),
        }
    }
}

/// Demand forecast for one meal.
///
/// `predicted_headcount` is signed: the model-backed path does not clamp it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predicted_headcount: i64,
    pub confidence_score: f64,
    pub prep_sheet: PrepSheet,
    pub model_status: ModelStatus,
}
