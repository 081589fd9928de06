mod manager;
mod persistence;
mod repository;
mod seed;

pub use manager::{CanteenStateManager, SkipOutcome};
pub use persistence::{CanteenState, load_state, save_state};
pub use repository::CanteenRepository;
pub use seed::{DEMO_MANAGER_EMAIL, SeedSummary, seed_demo_data};
