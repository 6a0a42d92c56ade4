use clap::Subcommand;
use habitual_core::storage::Database;
use habitual_core::{Analytics, Config};

use super::{print_json, resolve_date, CmdResult};

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Scores, consistency series, balance and weekly progress
    Summary {
        #[arg(long)]
        date: Option<String>,
    },
    /// Per-category balance
    Balance {
        #[arg(long)]
        date: Option<String>,
        /// Window length, overrides analytics.window_days
        #[arg(long)]
        days: Option<u32>,
    },
    /// Contribution grid cells, oldest first
    Grid {
        #[arg(long)]
        date: Option<String>,
        /// Grid length, overrides analytics.grid_days
        #[arg(long)]
        days: Option<u32>,
    },
}

pub fn run(action: AnalyticsAction) -> CmdResult {
    let db = Database::open()?;
    let habits = db.load_habits()?;
    let log = db.load_log()?;
    let config = Config::load_or_default();

    match action {
        AnalyticsAction::Summary { date } => {
            let date = resolve_date(date.as_deref())?;
            print_json(&config.analytics().summary(habits.as_slice(), &log, date))?;
        }
        AnalyticsAction::Balance { date, days } => {
            let date = resolve_date(date.as_deref())?;
            let mut settings = config.analytics;
            if let Some(days) = days {
                settings.window_days = days;
            }
            let analytics = Analytics::new(config.engine(), settings);
            print_json(&analytics.balance(habits.as_slice(), &log, date))?;
        }
        AnalyticsAction::Grid { date, days } => {
            let date = resolve_date(date.as_deref())?;
            let mut settings = config.analytics;
            if let Some(days) = days {
                settings.grid_days = days;
            }
            let analytics = Analytics::new(config.engine(), settings);
            print_json(&analytics.grid(habits.as_slice(), &log, date))?;
        }
    }
    Ok(())
}
