use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::models::{MealType, day_of_week};

/// One observed (or simulated) meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub meal_type: MealType,
    /// Monday = 0 through Sunday = 6.
    pub day_of_week: u8,
    pub total_students: u32,
    pub actual_attendance: i64,
}

/// Parameters for simulated history.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub start: NaiveDate,
    pub days: u32,
    pub total_students: u32,
    /// Attendance share drawn on Monday to Friday.
    pub weekday_range: (f64, f64),
    /// Attendance share drawn on Saturday and Sunday.
    pub weekend_range: (f64, f64),
    /// Additive noise, in students.
    pub noise: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            days: 365 * 2,
            total_students: 2000,
            weekday_range: (0.85, 0.98),
            weekend_range: (0.6, 0.8),
            noise: 20.0,
        }
    }
}

fn is_weekend(dow: u8) -> bool {
    dow >= 5
}

/// Simulate attendance for every meal of every day in the window.
pub fn generate_history(config: &SyntheticConfig, rng: &mut impl Rng) -> Vec<AttendanceRecord> {
    let mut records = Vec::with_capacity(config.days as usize * MealType::ALL.len());

    for offset in 0..config.days {
        let Some(date) = config.start.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        let dow = day_of_week(date);
        let (low, high) = if is_weekend(dow) {
            config.weekend_range
        } else {
            config.weekday_range
        };

        for meal_type in MealType::ALL {
            let base = config.total_students as f64 * rng.gen_range(low..=high);
            let noise = if config.noise > 0.0 {
                rng.gen_range(-config.noise..=config.noise)
            } else {
                0.0
            };

            records.push(AttendanceRecord {
                date,
                meal_type,
                day_of_week: dow,
                total_students: config.total_students,
                actual_attendance: (base + noise).trunc() as i64,
            });
        }
    }

    records
}

/// Read history rows from CSV.
///
/// Rows whose `day_of_week` column disagrees with the Monday = 0 convention
/// are corrected from their date.
pub fn read_history<P: AsRef<Path>>(path: P) -> Result<Vec<AttendanceRecord>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    let mut corrected = 0usize;

    for row in rdr.deserialize() {
        let mut record: AttendanceRecord = row?;
        let dow = day_of_week(record.date);
        if record.day_of_week != dow {
            record.day_of_week = dow;
            corrected += 1;
        }
        records.push(record);
    }

    if corrected > 0 {
        warn!(
            "{} history rows used a different weekday convention and were corrected",
            corrected
        );
    }
    Ok(records)
}

/// Write history rows to CSV with a header.
pub fn write_history<P: AsRef<Path>>(path: P, records: &[AttendanceRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
