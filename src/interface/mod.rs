pub mod prompts;
pub mod render;

pub use prompts::{fuzzy_candidates, prompt_rating, prompt_yes_no, resolve_menu_item};
pub use render::{display_attendance, display_dashboard, display_feedback, display_forecast};
