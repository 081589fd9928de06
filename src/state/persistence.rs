use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{Attendance, Feedback, Menu, MenuItem, User};

/// Everything the canteen store persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanteenState {
    pub users: Vec<User>,
    pub menu_items: Vec<MenuItem>,
    pub menus: Vec<Menu>,
    pub attendance: Vec<Attendance>,
    pub feedback: Vec<Feedback>,
}

/// Load the canteen state from a JSON file.
///
/// A missing file is an empty store.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<CanteenState> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("state file {} not found, starting empty", path.display());
        return Ok(CanteenState::default());
    }

    let content = fs::read_to_string(path)?;
    let state: CanteenState = serde_json::from_str(&content)?;
    debug!(
        "loaded {} users, {} menus, {} skips from {}",
        state.users.len(),
        state.menus.len(),
        state.attendance.len(),
        path.display()
    );
    Ok(state)
}

/// Save the canteen state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &CanteenState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}
