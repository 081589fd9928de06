use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::forecast::constants::*;

/// How the engine produces its head-count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Random adjustment of the naive estimate, for demos.
    Mock,
    /// Roster minus skips minus a fixed buffer.
    Heuristic,
    /// Trained artifact, falling back to the heuristic if it cannot be loaded.
    #[default]
    Model,
}

/// One prep-sheet line: quantity = `kg_per_head` × predicted head-count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepRatio {
    pub ingredient: String,
    pub kg_per_head: f64,
}

/// Tunable forecast and savings settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub strategy: StrategyKind,
    pub model_path: PathBuf,
    pub fallback_buffer: i64,
    pub cost_per_meal: f64,
    pub currency: String,
    pub monthly_multiplier: u32,
    pub prep_ratios: Vec<PrepRatio>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            fallback_buffer: FALLBACK_BUFFER,
            cost_per_meal: COST_PER_MEAL,
            currency: CURRENCY.to_string(),
            monthly_multiplier: MONTHLY_MULTIPLIER,
            prep_ratios: default_prep_ratios()
                .into_iter()
                .map(|(ingredient, kg_per_head)| PrepRatio {
                    ingredient,
                    kg_per_head,
                })
                .collect(),
        }
    }
}

/// Load the forecast config from a JSON file.
///
/// A missing file yields the defaults; a malformed one is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ForecastConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("config {} not found, using defaults", path.display());
        return Ok(ForecastConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: ForecastConfig = serde_json::from_str(&content)?;
    info!(
        "loaded config from {} (strategy: {:?})",
        path.display(),
        config.strategy
    );
    Ok(config)
}
