use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use canteen_forecast_rs::forecast::{DEFAULT_MODEL_PATH, save_model};
use canteen_forecast_rs::logging;
use canteen_forecast_rs::models::parse_date;
use canteen_forecast_rs::trainer::{
    SyntheticConfig, generate_history, print_report, print_table, read_history,
    train_and_evaluate, write_history,
};

#[derive(Parser, Debug)]
#[command(name = "trainer")]
#[command(about = "Fit the attendance model used by the canteen forecaster")]
struct Args {
    /// Read history from this CSV instead of simulating it
    #[arg(long)]
    history: Option<PathBuf>,

    /// Days of history to simulate
    #[arg(long, default_value = "730")]
    days: u32,

    /// First simulated day (YYYY-MM-DD)
    #[arg(long, default_value = "2023-01-01")]
    start: String,

    /// Roster size used for simulated history
    #[arg(long, default_value = "2000")]
    students: u32,

    /// Random seed for simulation and the train/test split
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Also write the (simulated) history to this CSV
    #[arg(long)]
    write_history: Option<PathBuf>,

    /// Share of rows held out for evaluation
    #[arg(long, default_value = "0.2")]
    test_split: f64,

    /// Where to write the fitted model
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
}

fn main() {
    logging::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> canteen_forecast_rs::Result<()> {
    let mut rng = StdRng::seed_from_u64(args.seed);

    let records = match &args.history {
        Some(path) => {
            let records = read_history(path)?;
            println!("Loaded {} rows from {:?}", records.len(), path);
            records
        }
        None => {
            let config = SyntheticConfig {
                start: parse_date(&args.start)?,
                days: args.days,
                total_students: args.students,
                ..Default::default()
            };
            let records = generate_history(&config, &mut rng);
            println!(
                "Simulated {} rows ({} days from {})",
                records.len(),
                config.days,
                config.start
            );
            records
        }
    };

    if let Some(path) = &args.write_history {
        write_history(path, &records)?;
        println!("History written to {:?}", path);
    }

    let (table, report) = train_and_evaluate(&records, args.test_split, &mut rng)?;
    info!(
        "trained on {} rows, evaluated on {}",
        report.train_rows, report.test_rows
    );

    print_table(&table);
    print_report(&report);

    save_model(&args.model, &table)?;
    println!("Model written to {:?}", args.model);
    Ok(())
}
