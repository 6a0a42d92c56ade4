use std::path::PathBuf;

use clap::Subcommand;
use habitual_core::social::{rank, LeaderboardEntry, PublicStats};
use habitual_core::storage::Database;
use habitual_core::Config;

use super::{print_json, resolve_date, CmdResult};

#[derive(Subcommand)]
pub enum LeaderboardAction {
    /// Figures this user would publish
    Stats {
        #[arg(long)]
        date: Option<String>,
    },
    /// Rank a JSON array of entries
    Rank {
        /// File with `[{"id", "name", "score", "streak"}, ...]`
        file: PathBuf,
        /// Add the local user's own stats to the board
        #[arg(long)]
        with_me: bool,
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: LeaderboardAction) -> CmdResult {
    let db = Database::open()?;
    let engine = Config::load_or_default().engine();

    match action {
        LeaderboardAction::Stats { date } => {
            let date = resolve_date(date.as_deref())?;
            let stats = PublicStats::compute(&engine, db.load_habits()?.as_slice(), &db.load_log()?, date);
            print_json(&stats)?;
        }
        LeaderboardAction::Rank {
            file,
            with_me,
            date,
        } => {
            let mut entries: Vec<LeaderboardEntry> =
                serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            if with_me {
                let date = resolve_date(date.as_deref())?;
                let stats =
                    PublicStats::compute(&engine, db.load_habits()?.as_slice(), &db.load_log()?, date);
                let name = db
                    .load_profile()?
                    .map(|p| p.name)
                    .unwrap_or_else(|| "me".to_string());
                entries.push(LeaderboardEntry {
                    id: "me".to_string(),
                    name,
                    score: i64::from(stats.score),
                    streak: stats.streak,
                    is_me: true,
                });
            }
            print_json(&rank(entries))?;
        }
    }
    Ok(())
}
