pub mod fit;
pub mod history;
pub mod output;

pub use fit::{fit_table, mean_absolute_error, r_squared, train_and_evaluate, train_test_split};
pub use history::{
    AttendanceRecord, SyntheticConfig, generate_history, read_history, write_history,
};
pub use output::{TrainingReport, print_report, print_table};
