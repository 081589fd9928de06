use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::error::{CanteenError, Result};
use crate::models::{
    Attendance, AttendanceStatus, Feedback, MAX_RATING, MIN_RATING, MealType, Menu, MenuItem,
    Role, User,
};
use crate::state::persistence::CanteenState;

/// Result of a skip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipOutcome {
    Recorded,
    AlreadySkipped,
}

/// Manages users, menus, skips, and feedback held in a `CanteenState`.
pub struct CanteenStateManager {
    state: CanteenState,
}

fn next_id<T>(records: &[T], id: impl Fn(&T) -> u32) -> u32 {
    records.iter().map(id).max().unwrap_or(0) + 1
}

impl CanteenStateManager {
    pub fn new(state: CanteenState) -> Self {
        Self { state }
    }

    /// Register a user. Emails are unique, case-insensitively.
    pub fn register_user(&mut self, email: &str, role: Role) -> Result<&User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(CanteenError::InvalidInput(format!(
                "'{}' is not a valid email",
                email
            )));
        }
        if self.find_user(&email).is_some() {
            return Err(CanteenError::DuplicateUser(email));
        }

        let user = User {
            id: next_id(&self.state.users, |u| u.id),
            email,
            role,
            created_at: Utc::now(),
        };
        debug!("registered {} as {}", user.email, user.role);
        self.state.users.push(user);
        Ok(&self.state.users[self.state.users.len() - 1])
    }

    /// Get a user by email (case-insensitive).
    pub fn find_user(&self, email: &str) -> Option<&User> {
        let key = email.trim().to_lowercase();
        self.state.users.iter().find(|u| u.key() == key)
    }

    fn require_user(&self, email: &str) -> Result<&User> {
        self.find_user(email)
            .ok_or_else(|| CanteenError::UserNotFound(email.to_string()))
    }

    /// Get or create a menu item by name (case-insensitive).
    pub fn add_menu_item(&mut self, name: &str, category: &str) -> &MenuItem {
        let key = name.trim().to_lowercase();
        if let Some(pos) = self.state.menu_items.iter().position(|i| i.key() == key) {
            return &self.state.menu_items[pos];
        }

        let item = MenuItem {
            id: next_id(&self.state.menu_items, |i| i.id),
            name: name.trim().to_string(),
            category: category.trim().to_string(),
        };
        self.state.menu_items.push(item);
        &self.state.menu_items[self.state.menu_items.len() - 1]
    }

    pub fn find_menu_item(&self, name: &str) -> Option<&MenuItem> {
        let key = name.trim().to_lowercase();
        self.state.menu_items.iter().find(|i| i.key() == key)
    }

    pub fn menu_item_by_id(&self, id: u32) -> Option<&MenuItem> {
        self.state.menu_items.iter().find(|i| i.id == id)
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.state.menu_items
    }

    /// Create the menu for one meal context from existing item names.
    pub fn create_menu(
        &mut self,
        meal_date: NaiveDate,
        meal_type: MealType,
        item_names: &[String],
    ) -> Result<&Menu> {
        if self.find_menu(meal_date, meal_type).is_some() {
            return Err(CanteenError::DuplicateMenu(format!(
                "{} on {}",
                meal_type, meal_date
            )));
        }

        let items = item_names
            .iter()
            .map(|name| {
                self.find_menu_item(name)
                    .map(|i| i.id)
                    .ok_or_else(|| CanteenError::MenuItemNotFound(name.clone()))
            })
            .collect::<Result<Vec<u32>>>()?;

        let menu = Menu {
            id: next_id(&self.state.menus, |m| m.id),
            meal_date,
            meal_type,
            items,
        };
        debug!("created menu {}", menu.describe());
        self.state.menus.push(menu);
        Ok(&self.state.menus[self.state.menus.len() - 1])
    }

    pub fn find_menu(&self, meal_date: NaiveDate, meal_type: MealType) -> Option<&Menu> {
        self.state
            .menus
            .iter()
            .find(|m| m.meal_date == meal_date && m.meal_type == meal_type)
    }

    pub fn menu_by_id(&self, id: u32) -> Option<&Menu> {
        self.state.menus.iter().find(|m| m.id == id)
    }

    /// Record that a user will not attend a meal.
    ///
    /// Skipping the same menu twice is reported, not rejected.
    pub fn skip_meal(
        &mut self,
        email: &str,
        meal_date: NaiveDate,
        meal_type: MealType,
    ) -> Result<SkipOutcome> {
        let user_id = self.require_user(email)?.id;
        let menu_id = self
            .find_menu(meal_date, meal_type)
            .map(|m| m.id)
            .ok_or_else(|| {
                CanteenError::MenuNotFound(format!("{} on {}", meal_type, meal_date))
            })?;

        let exists = self
            .state
            .attendance
            .iter()
            .any(|a| a.user_id == user_id && a.menu_id == menu_id);
        if exists {
            return Ok(SkipOutcome::AlreadySkipped);
        }

        let record = Attendance {
            id: next_id(&self.state.attendance, |a| a.id),
            user_id,
            menu_id,
            status: AttendanceStatus::Skipped,
            timestamp: Utc::now(),
        };
        self.state.attendance.push(record);
        Ok(SkipOutcome::Recorded)
    }

    /// Store a rating for a menu item.
    pub fn submit_feedback(
        &mut self,
        email: &str,
        item_name: &str,
        rating: u8,
        comments: &str,
    ) -> Result<&Feedback> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CanteenError::InvalidInput(format!(
                "rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }

        let user_id = self.require_user(email)?.id;
        let item_id = self
            .find_menu_item(item_name)
            .map(|i| i.id)
            .ok_or_else(|| CanteenError::MenuItemNotFound(item_name.to_string()))?;

        let feedback = Feedback {
            id: next_id(&self.state.feedback, |f| f.id),
            user_id,
            item_id,
            rating,
            comments: comments.trim().to_string(),
            timestamp: Utc::now(),
        };
        self.state.feedback.push(feedback);
        Ok(&self.state.feedback[self.state.feedback.len() - 1])
    }

    /// Skips visible to a user: their own, or all of them for a manager.
    pub fn attendance_for(&self, email: &str) -> Result<Vec<&Attendance>> {
        let user = self.require_user(email)?;
        Ok(self
            .state
            .attendance
            .iter()
            .filter(|a| user.is_manager() || a.user_id == user.id)
            .collect())
    }

    /// Feedback visible to a user: their own, or all of it for a manager.
    pub fn feedback_for(&self, email: &str) -> Result<Vec<&Feedback>> {
        let user = self.require_user(email)?;
        Ok(self
            .state
            .feedback
            .iter()
            .filter(|f| user.is_manager() || f.user_id == user.id)
            .collect())
    }

    /// Number of users with the student role.
    pub fn student_count(&self) -> u32 {
        self.state
            .users
            .iter()
            .filter(|u| u.role == Role::Student)
            .count() as u32
    }

    /// Number of skips recorded against a menu.
    pub fn skip_count(&self, menu_id: u32) -> u32 {
        self.state
            .attendance
            .iter()
            .filter(|a| a.menu_id == menu_id)
            .count() as u32
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// Borrow the state for serialization.
    pub fn state(&self) -> &CanteenState {
        &self.state
    }
}
