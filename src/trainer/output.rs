use crate::forecast::AttendanceTable;
use crate::models::MealType;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    pub r_squared: f64,
    pub mean_absolute_error: f64,
}

/// Print the fitted ratio grid, one row per meal type.
pub fn print_table(table: &AttendanceTable) {
    println!();
    println!("=== Attendance Ratios ===");
    println!();

    print!("{:<10}", "");
    for day in WEEKDAYS {
        print!(" {:>6}", day);
    }
    println!();

    for meal_type in MealType::ALL {
        print!("{:<10}", meal_type.as_str());
        for dow in 0..7u8 {
            print!(" {:>6.3}", table.ratio_for(meal_type, dow));
        }
        println!();
    }

    println!();
    println!("Default ratio: {:.3}", table.default_ratio);
}

/// Print evaluation metrics for a training run.
pub fn print_report(report: &TrainingReport) {
    println!();
    println!("--- Evaluation ---");
    println!("Train rows: {}", report.train_rows);
    println!("Test rows:  {}", report.test_rows);
    println!("R^2 score:  {:.4}", report.r_squared);
    println!("MAE:        {:.1} students", report.mean_absolute_error);
    println!();
}
