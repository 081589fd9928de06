use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use canteen_forecast_rs::cli::{Cli, Command};
use canteen_forecast_rs::dashboard::build_summary;
use canteen_forecast_rs::error::Result;
use canteen_forecast_rs::forecast::{
    DEFAULT_MEAL_TYPE, ForecastConfig, ForecastEngine, estimate_savings, load_config,
};
use canteen_forecast_rs::interface::{
    display_attendance, display_dashboard, display_feedback, display_forecast, prompt_rating,
    prompt_yes_no, resolve_menu_item,
};
use canteen_forecast_rs::logging;
use canteen_forecast_rs::models::{MealContext, MealType, Role, parse_date};
use canteen_forecast_rs::state::{
    CanteenStateManager, DEMO_MANAGER_EMAIL, SkipOutcome, load_state, save_state, seed_demo_data,
};

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let state_path = Path::new(&cli.file);

    match cli.command {
        Command::Register { email, role } => cmd_register(state_path, &email, &role),
        Command::AddMenu {
            date,
            meal_type,
            items,
        } => cmd_add_menu(state_path, &date, &meal_type, &items),
        Command::Skip {
            email,
            date,
            meal_type,
        } => cmd_skip(state_path, &email, &date, &meal_type),
        Command::Feedback {
            email,
            item,
            rating,
            comments,
        } => cmd_feedback(state_path, &email, &item, rating, &comments),
        Command::History { email } => cmd_history(state_path, &email),
        Command::Forecast {
            date,
            meal_type,
            total,
            skips,
        } => {
            let config = load_forecast_config(&cli.config, cli.model.as_deref())?;
            let ctx = meal_context(date.as_deref(), meal_type.as_deref())?;
            cmd_forecast(&config, &ctx, total, skips)
        }
        Command::Dashboard {
            email,
            date,
            meal_type,
            json,
        } => {
            let config = load_forecast_config(&cli.config, cli.model.as_deref())?;
            let ctx = meal_context(date.as_deref(), meal_type.as_deref())?;
            cmd_dashboard(state_path, &config, &email, &ctx, json)
        }
        Command::Seed {
            students,
            skips,
            seed,
            date,
        } => cmd_seed(state_path, students, skips, seed, date.as_deref()),
    }
}

fn load_forecast_config(path: &str, model_override: Option<&str>) -> Result<ForecastConfig> {
    let mut config = load_config(path)?;
    if let Some(model) = model_override {
        config.model_path = PathBuf::from(model);
    }
    Ok(config)
}

fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

fn meal_context(date: Option<&str>, meal_type: Option<&str>) -> Result<MealContext> {
    let date = resolve_date(date)?;
    let meal_type = match meal_type {
        Some(s) => s.parse()?,
        None => DEFAULT_MEAL_TYPE,
    };
    Ok(MealContext::new(date, meal_type))
}

fn open_store(path: &Path) -> Result<CanteenStateManager> {
    Ok(CanteenStateManager::new(load_state(path)?))
}

/// Register a user account.
fn cmd_register(path: &Path, email: &str, role: &str) -> Result<()> {
    let role: Role = role.parse()?;
    let mut manager = open_store(path)?;

    let user = manager.register_user(email, role)?;
    println!("Registered {} as {}.", user.email, user.role);

    save_state(path, manager.state())?;
    Ok(())
}

/// Create a menu, adding unknown items to the catalogue after confirmation.
fn cmd_add_menu(path: &Path, date: &str, meal_type: &str, items: &str) -> Result<()> {
    let date = parse_date(date)?;
    let meal_type: MealType = meal_type.parse()?;
    let mut manager = open_store(path)?;

    let names: Vec<String> = items
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    for name in &names {
        if manager.find_menu_item(name).is_none() {
            let add = prompt_yes_no(&format!("'{}' is not in the catalogue. Add it?", name), true)?;
            if add {
                manager.add_menu_item(name, "");
            }
        }
    }

    let menu = manager.create_menu(date, meal_type, &names)?;
    println!("Created menu for {} with {} items.", menu.describe(), menu.items.len());

    save_state(path, manager.state())?;
    Ok(())
}

/// Opt a user out of a meal.
fn cmd_skip(path: &Path, email: &str, date: &str, meal_type: &str) -> Result<()> {
    let date = parse_date(date)?;
    let meal_type: MealType = meal_type.parse()?;
    let mut manager = open_store(path)?;

    match manager.skip_meal(email, date, meal_type)? {
        SkipOutcome::Recorded => {
            println!("Meal {} on {} marked as skipped.", meal_type, date);
            save_state(path, manager.state())?;
        }
        SkipOutcome::AlreadySkipped => {
            println!("You have already marked this meal as skipped.");
        }
    }
    Ok(())
}

/// Submit a rating for a menu item.
fn cmd_feedback(
    path: &Path,
    email: &str,
    item: &str,
    rating: Option<u8>,
    comments: &str,
) -> Result<()> {
    let mut manager = open_store(path)?;

    let item_name = resolve_menu_item(manager.menu_items(), item)?;
    let rating = match rating {
        Some(r) => r,
        None => prompt_rating(&item_name)?,
    };

    manager.submit_feedback(email, &item_name, rating, comments)?;
    println!("Feedback for {} submitted.", item_name);

    save_state(path, manager.state())?;
    Ok(())
}

/// Show what a user can see of skips and feedback.
fn cmd_history(path: &Path, email: &str) -> Result<()> {
    let manager = open_store(path)?;

    let attendance = manager.attendance_for(email)?;
    display_attendance(&attendance, &manager);

    let feedback = manager.feedback_for(email)?;
    display_feedback(&feedback, &manager);
    Ok(())
}

/// Forecast from counts given on the command line.
fn cmd_forecast(config: &ForecastConfig, ctx: &MealContext, total: u32, skips: u32) -> Result<()> {
    let engine = ForecastEngine::from_config(config);
    let result = engine.forecast(ctx, total, skips);
    let savings = estimate_savings(total, result.predicted_headcount, config.cost_per_meal);

    display_forecast(ctx, &result, savings, &config.currency);
    Ok(())
}

/// Manager dashboard for one meal.
fn cmd_dashboard(
    path: &Path,
    config: &ForecastConfig,
    email: &str,
    ctx: &MealContext,
    json: bool,
) -> Result<()> {
    let manager = open_store(path)?;
    let engine = ForecastEngine::from_config(config);

    let summary = build_summary(&manager, &engine, config, email, ctx.date, ctx.meal_type)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        display_dashboard(&summary, config.monthly_multiplier);
    }
    Ok(())
}

/// Populate the store with demo data.
fn cmd_seed(path: &Path, students: usize, skips: usize, seed: u64, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    let mut manager = open_store(path)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let summary = seed_demo_data(&mut manager, students, skips, date, &mut rng)?;

    println!("Seeded data for {}:", date);
    println!("  {} new students", summary.students_created);
    println!("  {} new menus", summary.menus_created);
    println!("  {} skips recorded", summary.skips_recorded);
    println!("Manager login: {}", DEMO_MANAGER_EMAIL);

    save_state(path, manager.state())?;
    Ok(())
}
