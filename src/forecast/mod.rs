pub mod artifact;
pub mod calculations;
pub mod config;
pub mod constants;
pub mod engine;

pub use artifact::{AttendanceModel, AttendanceTable, FeatureRow, TableCell, load_model, save_model};
pub use calculations::{
    build_prep_sheet, confidence_score, estimate_savings, heuristic_headcount, monthly_projection,
    naive_estimate, round_to, truncate_prediction,
};
pub use config::{ForecastConfig, PrepRatio, StrategyKind, load_config};
pub use constants::*;
pub use engine::ForecastEngine;
