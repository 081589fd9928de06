use crate::forecast::config::PrepRatio;
use crate::forecast::constants::ROUND_DECIMALS;
use crate::models::PrepSheet;

/// Round to n decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Coerce a raw model output to a head-count by truncation toward zero.
#[inline]
pub fn truncate_prediction(raw: f64) -> i64 {
    raw.trunc() as i64
}

/// Naive attendance estimate: roster minus observed skips.
///
/// Signed, since callers may pass more skips than students.
#[inline]
pub fn naive_estimate(total_students: u32, live_skips: u32) -> i64 {
    total_students as i64 - live_skips as i64
}

/// Fallback head-count: `max(0, total − skips − buffer)`.
pub fn heuristic_headcount(total_students: u32, live_skips: u32, buffer: i64) -> i64 {
    (naive_estimate(total_students, live_skips) - buffer).max(0)
}

/// Agreement between a prediction and the naive estimate.
///
/// `1 − |naive − predicted| / total`, clamped to [0, 1]. An empty roster
/// scores 0.
pub fn confidence_score(total_students: u32, live_skips: u32, predicted: i64) -> f64 {
    if total_students == 0 {
        return 0.0;
    }

    // f64 so an extreme prediction cannot overflow the subtraction.
    let divergence = (naive_estimate(total_students, live_skips) as f64 - predicted as f64).abs();
    let confidence = 1.0 - divergence / total_students as f64;
    round_to(confidence.clamp(0.0, 1.0), ROUND_DECIMALS)
}

/// Ingredient quantities proportional to the predicted head-count.
pub fn build_prep_sheet(predicted: i64, ratios: &[PrepRatio]) -> PrepSheet {
    ratios
        .iter()
        .map(|r| {
            let quantity = round_to(predicted as f64 * r.kg_per_head, ROUND_DECIMALS);
            (r.ingredient.clone(), quantity)
        })
        .collect()
}

/// Projected saving for one meal: `(total − predicted) × cost_per_meal`.
pub fn estimate_savings(total_students: u32, predicted: i64, cost_per_meal: f64) -> f64 {
    (total_students as f64 - predicted as f64) * cost_per_meal
}

/// Scale a per-meal saving to a monthly display figure.
pub fn monthly_projection(per_meal_savings: f64, multiplier: u32) -> f64 {
    per_meal_savings * multiplier as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios() -> Vec<PrepRatio> {
        vec![
            PrepRatio {
                ingredient: "Rice".to_string(),
                kg_per_head: 0.1,
            },
            PrepRatio {
                ingredient: "Dal".to_string(),
                kg_per_head: 0.06,
            },
        ]
    }

    #[test]
    fn test_heuristic_scenario() {
        assert_eq!(heuristic_headcount(2000, 300, 50), 1650);
    }

    #[test]
    fn test_heuristic_clamps_at_zero() {
        assert_eq!(heuristic_headcount(0, 0, 50), 0);
        assert_eq!(heuristic_headcount(0, 10, 50), 0);
        assert_eq!(heuristic_headcount(30, 0, 50), 0);
        assert_eq!(heuristic_headcount(100, 200, 50), 0);
    }

    #[test]
    fn test_confidence_exact_agreement() {
        assert_eq!(confidence_score(2000, 300, 1700), 1.0);
    }

    #[test]
    fn test_confidence_partial_agreement() {
        // |1700 - 1500| / 2000 = 0.1
        assert!((confidence_score(2000, 300, 1500) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(confidence_score(100, 0, 500), 0.0);
        assert_eq!(confidence_score(100, 0, -500), 0.0);
    }

    #[test]
    fn test_extreme_predictions_do_not_overflow() {
        assert_eq!(confidence_score(2000, 300, i64::MIN), 0.0);
        assert_eq!(confidence_score(2000, 300, i64::MAX), 0.0);
        assert!(estimate_savings(2000, i64::MIN, 50.0).is_finite());
        assert!(estimate_savings(2000, i64::MAX, 50.0) < 0.0);
    }

    #[test]
    fn test_confidence_empty_roster() {
        assert_eq!(confidence_score(0, 0, 0), 0.0);
        assert_eq!(confidence_score(0, 5, 120), 0.0);
    }

    #[test]
    fn test_truncate_prediction() {
        assert_eq!(truncate_prediction(1699.97), 1699);
        assert_eq!(truncate_prediction(-3.7), -3);
    }

    #[test]
    fn test_prep_sheet_proportions() {
        let sheet = build_prep_sheet(1650, &ratios());
        assert_eq!(sheet.len(), 2);
        assert!((sheet["Rice"] - 165.0).abs() < 1e-9);
        assert!((sheet["Dal"] - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_prep_sheet_rounding() {
        let sheet = build_prep_sheet(7, &ratios());
        assert!((sheet["Dal"] - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_savings_scenario() {
        assert_eq!(estimate_savings(2000, 1650, 50.0), 17500.0);
    }

    #[test]
    fn test_savings_negative_when_over_roster() {
        assert_eq!(estimate_savings(100, 120, 50.0), -1000.0);
    }

    #[test]
    fn test_monthly_projection() {
        assert_eq!(monthly_projection(17500.0, 30), 525000.0);
    }
}
