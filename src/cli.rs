use clap::{Parser, Subcommand};

/// Canteen: meal skips, feedback, and attendance forecasts for a campus mess.
#[derive(Parser, Debug)]
#[command(name = "canteen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the canteen state JSON file.
    #[arg(short, long, default_value = "canteen_state.json")]
    pub file: String,

    /// Path to the forecast config JSON file.
    #[arg(short, long, default_value = "forecast_config.json")]
    pub config: String,

    /// Override the model artifact path from the config.
    #[arg(short, long)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a student or manager account.
    Register {
        #[arg(long)]
        email: String,

        /// student or manager.
        #[arg(long, default_value = "student")]
        role: String,
    },

    /// Create the menu for one meal from existing or new items.
    AddMenu {
        /// Meal date (YYYY-MM-DD).
        #[arg(long)]
        date: String,

        /// Breakfast, Lunch, or Dinner.
        #[arg(long)]
        meal_type: String,

        /// Comma-separated item names.
        #[arg(long, default_value = "")]
        items: String,
    },

    /// Opt out of a scheduled meal.
    Skip {
        #[arg(long)]
        email: String,

        #[arg(long)]
        date: String,

        #[arg(long)]
        meal_type: String,
    },

    /// Rate a menu item.
    Feedback {
        #[arg(long)]
        email: String,

        #[arg(long)]
        item: String,

        /// 1 to 5; prompted for when omitted.
        #[arg(long)]
        rating: Option<u8>,

        #[arg(long, default_value = "")]
        comments: String,
    },

    /// Show skips and feedback visible to a user.
    History {
        #[arg(long)]
        email: String,
    },

    /// Forecast attendance from explicit counts.
    Forecast {
        /// Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Defaults to Lunch.
        #[arg(long)]
        meal_type: Option<String>,

        /// Registered students.
        #[arg(long)]
        total: u32,

        /// Students who already skipped.
        #[arg(long, default_value = "0")]
        skips: u32,
    },

    /// Manager dashboard for one meal.
    Dashboard {
        #[arg(long)]
        email: String,

        /// Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Defaults to Lunch.
        #[arg(long)]
        meal_type: Option<String>,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fill the store with a day of demo data.
    Seed {
        #[arg(long, default_value = "1000")]
        students: usize,

        /// Random skips per meal.
        #[arg(long, default_value = "200")]
        skips: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
}
