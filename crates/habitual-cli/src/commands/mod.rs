pub mod analytics;
pub mod backup;
pub mod coach;
pub mod config;
pub mod habit;
pub mod leaderboard;
pub mod log;
pub mod onboard;
pub mod score;

use chrono::NaiveDate;
use habitual_core::date::{local_today, parse_date};
use habitual_core::ValidationError;
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// `--date` value, or the local calendar date when absent.
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate, ValidationError> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(local_today()),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
