use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::CanteenError;

/// One of the three scheduled servings of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }

    /// Closest known meal type by Jaro-Winkler similarity.
    fn closest(input: &str) -> MealType {
        let lowered = input.to_lowercase();
        MealType::ALL
            .into_iter()
            .max_by(|a, b| {
                let sa = jaro_winkler(&lowered, &a.as_str().to_lowercase());
                let sb = jaro_winkler(&lowered, &b.as_str().to_lowercase());
                sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(MealType::Lunch)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = CanteenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                CanteenError::InvalidInput(format!(
                    "unknown meal type '{}' (did you mean '{}'?)",
                    trimmed,
                    MealType::closest(trimmed)
                ))
            })
    }
}

/// A (date, meal type) pair identifying one scheduled serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealContext {
    pub date: NaiveDate,
    pub meal_type: MealType,
}

impl MealContext {
    pub fn new(date: NaiveDate, meal_type: MealType) -> Self {
        Self { date, meal_type }
    }

    /// Weekday with Monday = 0 through Sunday = 6.
    ///
    /// The trainer derives its `day_of_week` column with this same function.
    #[inline]
    pub fn day_of_week(&self) -> u8 {
        day_of_week(self.date)
    }
}

/// Weekday index of a date, Monday = 0 through Sunday = 6.
#[inline]
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> crate::error::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert_eq!(" DINNER ".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("Breakfast".parse::<MealType>().unwrap(), MealType::Breakfast);
    }

    #[test]
    fn test_parse_unknown_suggests_closest() {
        let err = "lnch".parse::<MealType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("did you mean 'Lunch'"), "got: {}", msg);
    }

    #[test]
    fn test_day_of_week_monday_zero() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(day_of_week(monday), 0);
        assert_eq!(day_of_week(sunday), 6);
        assert_eq!(MealContext::new(sunday, MealType::Lunch).day_of_week(), 6);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-03-14").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert!(parse_date("14/03/2025").is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MealType::Dinner).unwrap();
        assert_eq!(json, "\"Dinner\"");
    }
}
