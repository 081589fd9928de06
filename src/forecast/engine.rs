use rand::Rng;
use tracing::{debug, info};

use crate::forecast::artifact::{AttendanceModel, FeatureRow, load_model};
use crate::forecast::calculations::{
    build_prep_sheet, confidence_score, heuristic_headcount, naive_estimate, round_to,
    truncate_prediction,
};
use crate::forecast::config::{ForecastConfig, PrepRatio, StrategyKind};
use crate::forecast::constants::{
    FALLBACK_CONFIDENCE, MOCK_ADJUSTMENT_RANGE, MOCK_CONFIDENCE_RANGE, ROUND_DECIMALS,
};
use crate::models::{ForecastResult, MealContext, ModelStatus, PrepSheet};

enum Strategy {
    Mock,
    Heuristic,
    Model(Box<dyn AttendanceModel>),
}

/// Attendance forecaster for a single meal.
///
/// The strategy is fixed at construction. The engine holds no mutable state,
/// so one instance can serve concurrent callers by shared reference.
pub struct ForecastEngine {
    strategy: Strategy,
    fallback_buffer: i64,
    prep_ratios: Vec<PrepRatio>,
}

impl ForecastEngine {
    /// Build the engine selected by `config`.
    ///
    /// With the model strategy the artifact is loaded once here; if it is
    /// missing or unreadable the engine uses the heuristic for its lifetime.
    pub fn from_config(config: &ForecastConfig) -> Self {
        match config.strategy {
            StrategyKind::Mock => {
                info!("forecast engine using mock strategy");
                Self::mock(config)
            }
            StrategyKind::Heuristic => {
                info!("forecast engine using heuristic strategy");
                Self::heuristic(config)
            }
            StrategyKind::Model => match load_model(&config.model_path) {
                Ok(table) => {
                    info!(
                        "attendance model '{}' loaded from {} ({} cells)",
                        table.name(),
                        config.model_path.display(),
                        table.cells.len()
                    );
                    Self::with_model(Box::new(table), config)
                }
                Err(e) => {
                    info!(
                        "attendance model unavailable at {} ({}), using heuristic fallback",
                        config.model_path.display(),
                        e
                    );
                    Self::heuristic(config)
                }
            },
        }
    }

    /// Engine backed by an already-loaded model.
    pub fn with_model(model: Box<dyn AttendanceModel>, config: &ForecastConfig) -> Self {
        Self::new(Strategy::Model(model), config)
    }

    pub fn heuristic(config: &ForecastConfig) -> Self {
        Self::new(Strategy::Heuristic, config)
    }

    pub fn mock(config: &ForecastConfig) -> Self {
        Self::new(Strategy::Mock, config)
    }

    fn new(strategy: Strategy, config: &ForecastConfig) -> Self {
        Self {
            strategy,
            fallback_buffer: config.fallback_buffer,
            prep_ratios: config.prep_ratios.clone(),
        }
    }

    pub fn status(&self) -> ModelStatus {
        match self.strategy {
            Strategy::Mock => ModelStatus::Mock,
            Strategy::Heuristic => ModelStatus::NotLoaded,
            Strategy::Model(_) => ModelStatus::Loaded,
        }
    }

    /// Forecast attendance for one meal.
    ///
    /// `live_skips` is expected to be at most `total_students`; this is not
    /// checked, and violating it yields odd but finite numbers.
    pub fn forecast(&self, ctx: &MealContext, total_students: u32, live_skips: u32) -> ForecastResult {
        let result = match &self.strategy {
            Strategy::Model(model) => self.model_forecast(model.as_ref(), ctx, total_students, live_skips),
            Strategy::Heuristic => self.heuristic_forecast(total_students, live_skips),
            Strategy::Mock => self.mock_forecast(total_students, live_skips),
        };

        debug!(
            date = %ctx.date,
            meal = %ctx.meal_type,
            total_students,
            live_skips,
            predicted = result.predicted_headcount,
            confidence = result.confidence_score,
            "forecast computed"
        );
        result
    }

    fn model_forecast(
        &self,
        model: &dyn AttendanceModel,
        ctx: &MealContext,
        total_students: u32,
        live_skips: u32,
    ) -> ForecastResult {
        let row = FeatureRow::from_context(ctx, total_students);
        let predicted = truncate_prediction(model.predict(&row));

        ForecastResult {
            predicted_headcount: predicted,
            confidence_score: confidence_score(total_students, live_skips, predicted),
            prep_sheet: build_prep_sheet(predicted, &self.prep_ratios),
            model_status: ModelStatus::Loaded,
        }
    }

    fn heuristic_forecast(&self, total_students: u32, live_skips: u32) -> ForecastResult {
        ForecastResult {
            predicted_headcount: heuristic_headcount(total_students, live_skips, self.fallback_buffer),
            confidence_score: FALLBACK_CONFIDENCE,
            prep_sheet: PrepSheet::new(),
            model_status: ModelStatus::NotLoaded,
        }
    }

    fn mock_forecast(&self, total_students: u32, live_skips: u32) -> ForecastResult {
        let mut rng = rand::thread_rng();
        let adjustment = 1.0 - rng.gen_range(MOCK_ADJUSTMENT_RANGE.0..=MOCK_ADJUSTMENT_RANGE.1);
        let base = naive_estimate(total_students, live_skips) as f64;
        let predicted = truncate_prediction(base * adjustment);
        let confidence = rng.gen_range(MOCK_CONFIDENCE_RANGE.0..=MOCK_CONFIDENCE_RANGE.1);

        ForecastResult {
            predicted_headcount: predicted,
            confidence_score: round_to(confidence, ROUND_DECIMALS),
            prep_sheet: build_prep_sheet(predicted, &self.prep_ratios),
            model_status: ModelStatus::Mock,
        }
    }
}
