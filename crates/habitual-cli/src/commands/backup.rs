use std::path::PathBuf;

use clap::Subcommand;
use habitual_core::storage::Database;
use habitual_core::BackupData;
use serde_json::json;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write profile, habits and logs as JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace all data with a backup file
    Import {
        /// Backup JSON file
        file: PathBuf,
    },
}

pub fn run(action: BackupAction) -> CmdResult {
    let mut db = Database::open()?;

    match action {
        BackupAction::Export { output } => {
            let backup = BackupData::export(&db)?;
            match output {
                Some(path) => {
                    backup.write_to(&path)?;
                    print_json(&json!({ "path": path, "habits": backup.habits.len() }))?;
                }
                None => print_json(&backup)?,
            }
        }
        BackupAction::Import { file } => {
            let backup = BackupData::read_from(&file)?;
            backup.import(&mut db)?;
            tracing::info!(path = %file.display(), "backup imported");
            print_json(&json!({
                "habits": backup.habits.len(),
                "days": backup.logs.len(),
                "timestamp": backup.timestamp,
            }))?;
        }
    }
    Ok(())
}
