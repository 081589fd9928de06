pub mod cli;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod interface;
pub mod logging;
pub mod models;
pub mod state;
pub mod trainer;

pub use error::{CanteenError, Result};
pub use forecast::{ForecastConfig, ForecastEngine};
pub use models::{ForecastResult, MealContext, MealType, ModelStatus};
