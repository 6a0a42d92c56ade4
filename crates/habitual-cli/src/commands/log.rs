use std::collections::BTreeMap;

use clap::Subcommand;
use habitual_core::date::{format_date, trailing_window};
use habitual_core::storage::Database;
use habitual_core::{DayEntry, LogValue, ValidationError};
use serde_json::json;

use super::{print_json, resolve_date, CmdResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Mark a habit as done (or store a count)
    Done {
        /// Habit ID
        habit_id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Numeric value instead of `true`
        #[arg(long)]
        value: Option<i64>,
    },
    /// Clear a habit's entry for the day
    Undo {
        /// Habit ID
        habit_id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Record mood 1-5, or clear it with --clear
    Mood {
        /// Mood value 1-5
        #[arg(required_unless_present = "clear")]
        value: Option<i64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Show entries for the days ending at --date
    Show {
        #[arg(long)]
        date: Option<String>,
        /// Number of days to show
        #[arg(long, default_value = "1")]
        days: u32,
    },
}

pub fn run(action: LogAction) -> CmdResult {
    let mut db = Database::open()?;
    let mut log = db.load_log()?;

    match action {
        LogAction::Done {
            habit_id,
            date,
            value,
        } => {
            let date = resolve_date(date.as_deref())?;
            if !db.load_habits()?.contains(&habit_id) {
                return Err(ValidationError::UnknownHabit(habit_id).into());
            }
            let value = value.map(LogValue::from).unwrap_or(LogValue::Bool(true));
            log.toggle(&habit_id, date, value);
            let key = format_date(date);
            db.save_day(&key, log.day(date))?;
            tracing::debug!(habit = %habit_id, date = %key, "logged habit");
            print_json(&json!({ "date": key, "entry": log.day(date) }))?;
        }
        LogAction::Undo { habit_id, date } => {
            let date = resolve_date(date.as_deref())?;
            log.toggle(&habit_id, date, false);
            let key = format_date(date);
            db.save_day(&key, log.day(date))?;
            print_json(&json!({ "date": key, "entry": log.day(date) }))?;
        }
        LogAction::Mood { value, date, clear } => {
            let date = resolve_date(date.as_deref())?;
            match value {
                Some(mood) if !clear => log.set_mood(date, mood)?,
                _ => log.clear_mood(date),
            }
            let key = format_date(date);
            db.save_day(&key, log.day(date))?;
            print_json(&json!({ "date": key, "mood": log.mood(date) }))?;
        }
        LogAction::Show { date, days } => {
            let date = resolve_date(date.as_deref())?;
            let entries: BTreeMap<String, &DayEntry> = trailing_window(date, days.max(1))
                .into_iter()
                .filter_map(|d| log.day(d).map(|entry| (format_date(d), entry)))
                .collect();
            print_json(&entries)?;
        }
    }
    Ok(())
}
