use chrono::NaiveDate;

use crate::models::{MealType, Menu, User};
use crate::state::manager::CanteenStateManager;

/// Read queries the manager dashboard needs from the canteen store.
pub trait CanteenRepository {
    fn find_user(&self, email: &str) -> Option<&User>;

    fn find_menu(&self, meal_date: NaiveDate, meal_type: MealType) -> Option<&Menu>;

    /// Registered users holding the student role.
    fn student_count(&self) -> u32;

    /// Skips recorded against one menu.
    fn skip_count(&self, menu_id: u32) -> u32;
}

impl CanteenRepository for CanteenStateManager {
    fn find_user(&self, email: &str) -> Option<&User> {
        CanteenStateManager::find_user(self, email)
    }

    fn find_menu(&self, meal_date: NaiveDate, meal_type: MealType) -> Option<&Menu> {
        CanteenStateManager::find_menu(self, meal_date, meal_type)
    }

    fn student_count(&self) -> u32 {
        CanteenStateManager::student_count(self)
    }

    fn skip_count(&self, menu_id: u32) -> u32 {
        CanteenStateManager::skip_count(self, menu_id)
    }
}
