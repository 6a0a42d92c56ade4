use clap::Subcommand;
use habitual_core::date::format_date;
use habitual_core::storage::Database;
use habitual_core::{Config, ValidationError};
use serde_json::json;

use super::{print_json, resolve_date, CmdResult};

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Weighted score for one day (weekly bonus included)
    Day {
        #[arg(long)]
        date: Option<String>,
    },
    /// Average over the week so far
    Week {
        #[arg(long)]
        date: Option<String>,
    },
    /// Consecutive active days ending at --date
    Streak {
        #[arg(long)]
        date: Option<String>,
    },
    /// Weekly habit progress, for one habit or all of them
    Progress {
        /// Habit ID (all weekly habits when omitted)
        habit_id: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: ScoreAction) -> CmdResult {
    let db = Database::open()?;
    let habits = db.load_habits()?;
    let log = db.load_log()?;
    let config = Config::load_or_default();
    let engine = config.engine();

    match action {
        ScoreAction::Day { date } => {
            let date = resolve_date(date.as_deref())?;
            let tally = engine.tally_day(habits.as_slice(), &log, date, true);
            print_json(&json!({
                "date": format_date(date),
                "score": tally.score(),
                "achievedWeight": tally.achieved_weight,
                "totalWeight": tally.total_weight,
            }))?;
        }
        ScoreAction::Week { date } => {
            let date = resolve_date(date.as_deref())?;
            let average = engine.weekly_average(habits.as_slice(), &log, date);
            print_json(&json!({ "date": format_date(date), "weeklyAverage": average }))?;
        }
        ScoreAction::Streak { date } => {
            let date = resolve_date(date.as_deref())?;
            let streak = engine.streak(&log, date);
            print_json(&json!({ "date": format_date(date), "streak": streak }))?;
        }
        ScoreAction::Progress { habit_id, date } => {
            let date = resolve_date(date.as_deref())?;
            match habit_id {
                Some(id) => {
                    let habit = habits
                        .get(&id)
                        .ok_or_else(|| ValidationError::UnknownHabit(id.clone()))?;
                    print_json(&engine.weekly_progress(habit, &log, date))?;
                }
                None => {
                    let rows = config.analytics().weekly_rows(habits.as_slice(), &log, date);
                    print_json(&rows)?;
                }
            }
        }
    }
    Ok(())
}
