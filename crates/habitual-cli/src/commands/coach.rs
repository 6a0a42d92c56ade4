use clap::Subcommand;
use habitual_core::coach::coaching_prompt;
use habitual_core::storage::Database;
use habitual_core::Config;
use serde_json::json;

use super::{print_json, resolve_date, CmdResult};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Build the coaching prompt from profile, habits and recent logs
    Prompt {
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: CoachAction) -> CmdResult {
    let db = Database::open()?;
    let config = Config::load_or_default();

    match action {
        CoachAction::Prompt { date } => {
            let date = resolve_date(date.as_deref())?;
            let profile = db
                .load_profile()?
                .ok_or("no profile yet; run `habitual onboard` first")?;
            let habits = db.load_habits()?;
            let log = db.load_log()?;
            let prompt = coaching_prompt(&profile, habits.as_slice(), &log, date, &config.profile.locale)?;
            print_json(&json!({ "prompt": prompt }))?;
        }
    }
    Ok(())
}
