use crate::models::MealType;

/// Assumed no-show margin subtracted by the fallback heuristic.
pub const FALLBACK_BUFFER: i64 = 50;

/// Fixed confidence reported by the fallback heuristic.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Cost of preparing one meal.
pub const COST_PER_MEAL: f64 = 50.0;

/// Currency the cost constants are expressed in.
pub const CURRENCY: &str = "INR";

/// Days per month used for the projected monthly savings display.
pub const MONTHLY_MULTIPLIER: u32 = 30;

/// Meal shown on the dashboard when none is requested.
pub const DEFAULT_MEAL_TYPE: MealType = MealType::Lunch;

/// Artifact written by the trainer and read by the engine.
pub const DEFAULT_MODEL_PATH: &str = "attendance_model.json";

// ─────────────────────────────────────────────────────────────────────────────
// Prep sheet ratios (kg per predicted head)
// ─────────────────────────────────────────────────────────────────────────────

pub const RICE_KG_PER_HEAD: f64 = 0.1;
pub const DAL_KG_PER_HEAD: f64 = 0.06;

/// Decimal places kept for prep quantities and confidence scores.
pub const ROUND_DECIMALS: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Mock strategy ranges
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of the naive estimate shaved off by the mock, drawn uniformly.
pub const MOCK_ADJUSTMENT_RANGE: (f64, f64) = (0.05, 0.15);

/// Confidence reported by the mock, drawn uniformly.
pub const MOCK_CONFIDENCE_RANGE: (f64, f64) = (0.85, 0.98);

/// Default ingredient ratios as (name, kg per head).
pub fn default_prep_ratios() -> Vec<(String, f64)> {
    vec![
        ("Rice".to_string(), RICE_KG_PER_HEAD),
        ("Dal".to_string(), DAL_KG_PER_HEAD),
    ]
}
