use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Database;
use crate::error::Result;
use crate::habit::HabitList;
use crate::log::DailyLog;
use crate::onboarding::UserProfile;

/// Full snapshot of a user's data, as written by `backup export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub habits: HabitList,
    #[serde(default)]
    pub logs: DailyLog,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl BackupData {
    pub fn new(profile: Option<UserProfile>, habits: HabitList, logs: DailyLog) -> Self {
        Self {
            profile,
            habits,
            logs,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn export(db: &Database) -> Result<Self> {
        Ok(Self::new(db.load_profile()?, db.load_habits()?, db.load_log()?))
    }

    /// Parse a backup, rejecting duplicate habit ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut data: Self = serde_json::from_str(json)?;
        data.habits = HabitList::from_vec(data.habits.into_vec())?;
        Ok(data)
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Replace everything in `db` with this snapshot.
    pub fn import(&self, db: &mut Database) -> Result<()> {
        db.replace_all(self.profile.as_ref(), &self.habits, &self.logs)?;
        tracing::info!(timestamp = self.timestamp, "imported backup");
        Ok(())
    }
}
