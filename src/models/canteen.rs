use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CanteenError;
use crate::models::MealType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Manager => f.write_str("manager"),
        }
    }
}

impl FromStr for Role {
    type Err = CanteenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "manager" => Ok(Role::Manager),
            other => Err(CanteenError::InvalidInput(format!(
                "unknown role '{}' (expected 'student' or 'manager')",
                other
            ))),
        }
    }
}

/// A registered canteen user, identified by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Canonical key for lookups (lowercase email).
    pub fn key(&self) -> String {
        self.email.to_lowercase()
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub category: String,
}

impl MenuItem {
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// The menu served for one meal context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: u32,
    pub meal_date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default)]
    pub items: Vec<u32>,
}

impl Menu {
    pub fn describe(&self) -> String {
        format!("{} on {}", self.meal_type, self.meal_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Skipped,
}

/// A student's opt-out from one menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: u32,
    pub user_id: u32,
    pub menu_id: u32,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub timestamp: DateTime<Utc>,
}

/// Inclusive bounds for a feedback rating.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u32,
    pub user_id: u32,
    pub item_id: u32,
    pub rating: u8,
    #[serde(default)]
    pub comments: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
    }

    #[test]
    fn test_user_defaults_to_student() {
        let json = r#"{"id": 1, "email": "A@b.edu", "created_at": "2025-01-01T00:00:00Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.key(), "a@b.edu");
    }
}
