use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CanteenError, Result};
use crate::forecast::{ForecastConfig, ForecastEngine, estimate_savings};
use crate::models::{ForecastResult, MealContext, MealType};
use crate::state::CanteenRepository;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDetails {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub meal_type: MealType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveData {
    pub total_students: u32,
    pub skipped_students: u32,
    pub live_headcount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    pub projected_savings: f64,
    pub currency: String,
}

/// Manager dashboard: live counts, forecast, and projected savings for one meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub meal_details: MealDetails,
    pub live_data: LiveData,
    pub ai_predictions: ForecastResult,
    pub financials: Financials,
}

/// Build the dashboard summary for one meal.
///
/// Only managers may request it. The menu for the meal context must exist.
pub fn build_summary<R: CanteenRepository>(
    repo: &R,
    engine: &ForecastEngine,
    config: &ForecastConfig,
    requester_email: &str,
    date: NaiveDate,
    meal_type: MealType,
) -> Result<DashboardSummary> {
    let requester = repo
        .find_user(requester_email)
        .ok_or_else(|| CanteenError::UserNotFound(requester_email.to_string()))?;
    if !requester.is_manager() {
        return Err(CanteenError::Forbidden(format!(
            "{} is not a manager",
            requester.email
        )));
    }

    let menu = repo
        .find_menu(date, meal_type)
        .ok_or_else(|| CanteenError::MenuNotFound(format!("{} on {}", meal_type, date)))?;

    let total_students = repo.student_count();
    let skipped_students = repo.skip_count(menu.id);
    let live_headcount = total_students as i64 - skipped_students as i64;

    let ctx = MealContext::new(date, meal_type);
    let forecast = engine.forecast(&ctx, total_students, skipped_students);
    let projected_savings =
        estimate_savings(total_students, forecast.predicted_headcount, config.cost_per_meal);

    info!(
        "dashboard for {}: {} students, {} skipped, predicted {}",
        menu.describe(),
        total_students,
        skipped_students,
        forecast.predicted_headcount
    );

    Ok(DashboardSummary {
        meal_details: MealDetails { date, meal_type },
        live_data: LiveData {
            total_students,
            skipped_students,
            live_headcount,
        },
        ai_predictions: forecast,
        financials: Financials {
            projected_savings,
            currency: config.currency.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelStatus, Role};
    use crate::state::{CanteenState, CanteenStateManager};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn store() -> CanteenStateManager {
        let mut manager = CanteenStateManager::new(CanteenState::default());
        manager.register_user("chef@uni.edu", Role::Manager).unwrap();
        for i in 0..120 {
            manager
                .register_user(&format!("s{}@uni.edu", i), Role::Student)
                .unwrap();
        }
        manager.create_menu(date(), MealType::Lunch, &[]).unwrap();
        for i in 0..20 {
            manager
                .skip_meal(&format!("s{}@uni.edu", i), date(), MealType::Lunch)
                .unwrap();
        }
        manager
    }

    #[test]
    fn test_summary_with_fallback_engine() {
        let repo = store();
        let config = ForecastConfig::default();
        let engine = ForecastEngine::heuristic(&config);

        let summary =
            build_summary(&repo, &engine, &config, "chef@uni.edu", date(), MealType::Lunch)
                .unwrap();

        assert_eq!(summary.live_data.total_students, 120);
        assert_eq!(summary.live_data.skipped_students, 20);
        assert_eq!(summary.live_data.live_headcount, 100);
        assert_eq!(summary.ai_predictions.predicted_headcount, 50);
        assert_eq!(summary.ai_predictions.model_status, ModelStatus::NotLoaded);
        assert_eq!(summary.financials.projected_savings, 3500.0);
        assert_eq!(summary.financials.currency, "INR");
    }

    #[test]
    fn test_students_are_forbidden() {
        let repo = store();
        let config = ForecastConfig::default();
        let engine = ForecastEngine::heuristic(&config);

        let err = build_summary(&repo, &engine, &config, "s1@uni.edu", date(), MealType::Lunch)
            .unwrap_err();
        assert!(matches!(err, CanteenError::Forbidden(_)));
    }

    #[test]
    fn test_missing_menu() {
        let repo = store();
        let config = ForecastConfig::default();
        let engine = ForecastEngine::heuristic(&config);

        let err = build_summary(&repo, &engine, &config, "chef@uni.edu", date(), MealType::Dinner)
            .unwrap_err();
        assert!(matches!(err, CanteenError::MenuNotFound(_)));
    }

    #[test]
    fn test_json_shape() {
        let repo = store();
        let config = ForecastConfig::default();
        let engine = ForecastEngine::heuristic(&config);
        let summary =
            build_summary(&repo, &engine, &config, "chef@uni.edu", date(), MealType::Lunch)
                .unwrap();

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["meal_details"]["date"], "2025-03-12");
        assert_eq!(value["meal_details"]["type"], "Lunch");
        assert_eq!(value["live_data"]["live_headcount"], 100);
        assert_eq!(value["ai_predictions"]["model_status"], "Not Loaded");
        assert_eq!(value["financials"]["currency"], "INR");
    }
}
