use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{CanteenError, Result};
use crate::forecast::{AttendanceModel, AttendanceTable, FeatureRow, TableCell};
use crate::models::MealType;
use crate::trainer::history::AttendanceRecord;
use crate::trainer::output::TrainingReport;

/// Running sums for a least-squares slope through the origin.
#[derive(Debug, Clone, Copy, Default)]
struct SlopeSums {
    sxy: f64,
    sxx: f64,
    samples: usize,
}

impl SlopeSums {
    fn add(&mut self, x: f64, y: f64) {
        self.sxy += x * y;
        self.sxx += x * x;
        self.samples += 1;
    }

    fn slope(&self) -> Option<f64> {
        (self.sxx > 0.0).then(|| self.sxy / self.sxx)
    }
}

/// Shuffle and split records; `test_fraction` of them go to the test set.
pub fn train_test_split(
    records: &[AttendanceRecord],
    test_fraction: f64,
    rng: &mut impl Rng,
) -> (Vec<AttendanceRecord>, Vec<AttendanceRecord>) {
    let mut shuffled = records.to_vec();
    shuffled.shuffle(rng);

    let fraction = test_fraction.clamp(0.0, 1.0);
    let test_len = (shuffled.len() as f64 * fraction).round() as usize;
    let train = shuffled.split_off(test_len);
    (train, shuffled)
}

/// Fit one attendance ratio per (meal type, weekday) cell.
///
/// Each ratio is the least-squares slope of attendance over roster size in
/// that cell; the pooled slope over all rows becomes the default ratio.
pub fn fit_table(records: &[AttendanceRecord]) -> AttendanceTable {
    let mut cells: BTreeMap<(MealType, u8), SlopeSums> = BTreeMap::new();
    let mut pooled = SlopeSums::default();

    for r in records {
        let x = r.total_students as f64;
        let y = r.actual_attendance as f64;
        cells.entry((r.meal_type, r.day_of_week)).or_default().add(x, y);
        pooled.add(x, y);
    }

    AttendanceTable {
        default_ratio: pooled.slope().unwrap_or(0.0),
        cells: cells
            .into_iter()
            .filter_map(|((meal_type, day_of_week), sums)| {
                sums.slope().map(|ratio| TableCell {
                    meal_type,
                    day_of_week,
                    ratio,
                    samples: sums.samples,
                })
            })
            .collect(),
    }
}

fn row(r: &AttendanceRecord) -> FeatureRow {
    FeatureRow {
        meal_type: r.meal_type,
        day_of_week: r.day_of_week,
        total_students: r.total_students,
    }
}

/// Coefficient of determination on a set of records.
///
/// Returns 0.0 for an empty set or one with no variance in the target.
pub fn r_squared(model: &dyn AttendanceModel, records: &[AttendanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let mean = records.iter().map(|r| r.actual_attendance as f64).sum::<f64>() / records.len() as f64;
    let ss_tot: f64 = records
        .iter()
        .map(|r| (r.actual_attendance as f64 - mean).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return 0.0;
    }

    let ss_res: f64 = records
        .iter()
        .map(|r| (r.actual_attendance as f64 - model.predict(&row(r))).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

/// Mean absolute error in students.
pub fn mean_absolute_error(model: &dyn AttendanceModel, records: &[AttendanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records
        .iter()
        .map(|r| (r.actual_attendance as f64 - model.predict(&row(r))).abs())
        .sum::<f64>()
        / records.len() as f64
}

/// Split, fit, and evaluate in one pass.
///
/// Fails when there is nothing to fit on, so a run never writes an
/// all-zero artifact. An empty hold-out set evaluates on the training rows.
pub fn train_and_evaluate(
    records: &[AttendanceRecord],
    test_fraction: f64,
    rng: &mut impl Rng,
) -> Result<(AttendanceTable, TrainingReport)> {
    if records.is_empty() {
        return Err(CanteenError::InvalidInput(
            "no history rows to train on".to_string(),
        ));
    }

    let (train, test) = train_test_split(records, test_fraction, rng);
    if train.is_empty() {
        return Err(CanteenError::InvalidInput(format!(
            "test split {} leaves no rows to train on",
            test_fraction
        )));
    }

    let table = fit_table(&train);
    let eval = if test.is_empty() { &train } else { &test };
    let report = TrainingReport {
        train_rows: train.len(),
        test_rows: test.len(),
        r_squared: r_squared(&table, eval),
        mean_absolute_error: mean_absolute_error(&table, eval),
    };
    Ok((table, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::history::{SyntheticConfig, generate_history};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(meal_type: MealType, dow: u8, total: u32, actual: i64) -> AttendanceRecord {
        AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1 + dow as u32).unwrap(),
            meal_type,
            day_of_week: dow,
            total_students: total,
            actual_attendance: actual,
        }
    }

    #[test]
    fn test_fit_exact_ratios() {
        let records = vec![
            record(MealType::Lunch, 0, 1000, 900),
            record(MealType::Lunch, 0, 2000, 1800),
            record(MealType::Dinner, 6, 1000, 600),
        ];
        let table = fit_table(&records);

        assert_eq!(table.cells.len(), 2);
        assert!((table.ratio_for(MealType::Lunch, 0) - 0.9).abs() < 1e-9);
        assert!((table.ratio_for(MealType::Dinner, 6) - 0.6).abs() < 1e-9);
        assert!(table.default_ratio > 0.6 && table.default_ratio < 0.9);
    }

    #[test]
    fn test_fit_empty() {
        let table = fit_table(&[]);
        assert!(table.cells.is_empty());
        assert_eq!(table.default_ratio, 0.0);
    }

    #[test]
    fn test_split_sizes() {
        let records: Vec<AttendanceRecord> = (0..10)
            .map(|i| record(MealType::Breakfast, 0, 100, i))
            .collect();
        let mut rng = StdRng::seed_from_u64(5);
        let (train, test) = train_test_split(&records, 0.2, &mut rng);

        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_synthetic_fit_quality() {
        let mut rng = StdRng::seed_from_u64(42);
        let records = generate_history(&SyntheticConfig::default(), &mut rng);
        let (train, test) = train_test_split(&records, 0.2, &mut rng);
        let table = fit_table(&train);

        assert_eq!(table.cells.len(), 21);
        // Weekend/weekday gap dominates the variance.
        assert!(r_squared(&table, &test) > 0.5);
        assert!(mean_absolute_error(&table, &test) < 150.0);

        let weekday = table.ratio_for(MealType::Lunch, 2);
        let weekend = table.ratio_for(MealType::Lunch, 6);
        assert!(weekday > weekend);
    }

    #[test]
    fn test_r_squared_perfect_fit() {
        let records = vec![
            record(MealType::Lunch, 0, 1000, 900),
            record(MealType::Lunch, 0, 2000, 1800),
        ];
        let table = fit_table(&records);
        assert!((r_squared(&table, &records) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_train_rejects_empty_training_set() {
        let records: Vec<AttendanceRecord> = (0..10)
            .map(|i| record(MealType::Lunch, 0, 100, 80 + i))
            .collect();
        let mut rng = StdRng::seed_from_u64(5);

        let err = train_and_evaluate(&records, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, CanteenError::InvalidInput(_)));

        let err = train_and_evaluate(&[], 0.2, &mut rng).unwrap_err();
        assert!(matches!(err, CanteenError::InvalidInput(_)));
    }

    #[test]
    fn test_train_without_holdout_evaluates_on_training_rows() {
        let records = vec![
            record(MealType::Lunch, 0, 1000, 900),
            record(MealType::Lunch, 0, 2000, 1800),
        ];
        let mut rng = StdRng::seed_from_u64(5);

        let (table, report) = train_and_evaluate(&records, 0.0, &mut rng).unwrap();
        assert_eq!(report.train_rows, 2);
        assert_eq!(report.test_rows, 0);
        assert!((report.r_squared - 1.0).abs() < 1e-9);
        assert!((table.ratio_for(MealType::Lunch, 0) - 0.9).abs() < 1e-9);
    }
}
