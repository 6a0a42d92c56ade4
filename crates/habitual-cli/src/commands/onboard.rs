use std::path::PathBuf;

use clap::Args;
use habitual_core::onboarding::complete_onboarding;
use habitual_core::storage::Database;
use habitual_core::SurveyAnswers;
use serde_json::json;

use super::{print_json, CmdResult};

#[derive(Args)]
pub struct OnboardArgs {
    /// Display name
    #[arg(long)]
    pub name: String,
    /// Survey answers as JSON; defaults are used for missing fields
    #[arg(long)]
    pub answers: Option<PathBuf>,
    /// Replace an existing habit list
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: OnboardArgs) -> CmdResult {
    let answers: SurveyAnswers = match &args.answers {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SurveyAnswers::default(),
    };

    let mut db = Database::open()?;
    if !args.force && !db.load_habits()?.is_empty() {
        return Err("habits already exist; pass --force to replace them".into());
    }

    let (profile, habits) = complete_onboarding(&args.name, answers)?;
    db.save_profile(&profile)?;
    db.save_habits(&habits)?;

    let ids: Vec<&str> = habits.iter().map(|h| h.id.as_str()).collect();
    print_json(&json!({ "profile": profile, "habits": ids }))
}
