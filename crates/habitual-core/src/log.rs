//! Sparse per-date log of habit completions and mood.
//!
//! Serialized exactly like the JSON the app has always stored:
//!
//! ```json
//! { "2024-01-03": { "sleep_7h": true, "mood": 4 } }
//! ```
//!
//! A missing key and `false` mean the same thing; [`DailyLog::toggle`]
//! removes the key instead of storing `false`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::date::{format_date, parse_date};
use crate::error::ValidationError;

/// Reserved per-day key holding the 1-5 mood rating.
pub const MOOD_KEY: &str = "mood";

/// A single logged value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    Bool(bool),
    Number(serde_json::Number),
    /// Anything else found in stored data. Never counts as logged.
    Other(serde_json::Value),
}

impl LogValue {
    /// Whether the value marks the habit as logged for the day.
    pub fn is_truthy(&self) -> bool {
        match self {
            LogValue::Bool(b) => *b,
            LogValue::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            LogValue::Other(_) => false,
        }
    }

    /// Whether the value keeps a streak alive: `true` or any number.
    pub fn is_activity(&self) -> bool {
        matches!(self, LogValue::Bool(true) | LogValue::Number(_))
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<i64> for LogValue {
    fn from(n: i64) -> Self {
        LogValue::Number(n.into())
    }
}

impl From<f64> for LogValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n)
            .map(LogValue::Number)
            .unwrap_or(LogValue::Other(serde_json::Value::Null))
    }
}

/// One day's record: habit id (or `"mood"`) to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayEntry(BTreeMap<String, LogValue>);

impl DayEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&LogValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LogValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<LogValue> {
        self.0.remove(key)
    }

    /// Truthy check; absent and malformed values are not logged.
    pub fn is_logged(&self, habit_id: &str) -> bool {
        self.0.get(habit_id).is_some_and(LogValue::is_truthy)
    }

    /// At least one `true` or numeric value, mood included.
    pub fn has_activity(&self) -> bool {
        self.0.values().any(LogValue::is_activity)
    }

    pub fn mood(&self) -> Option<f64> {
        match self.0.get(MOOD_KEY) {
            Some(LogValue::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LogValue)> {
        self.0.iter()
    }
}

/// Date-keyed log. Keys are kept as strings so malformed keys from older
/// data survive a round trip; they are simply never matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyLog(BTreeMap<String, DayEntry>);

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.0.get(&format_date(date))
    }

    pub fn day_by_key(&self, key: &str) -> Option<&DayEntry> {
        self.0.get(key)
    }

    pub fn is_logged(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.day(date).is_some_and(|e| e.is_logged(habit_id))
    }

    pub fn mood(&self, date: NaiveDate) -> Option<f64> {
        self.day(date).and_then(DayEntry::mood)
    }

    /// Apply the toggle contract: `false` removes the key, anything else is
    /// stored as-is. A day left without keys is dropped entirely.
    pub fn toggle(&mut self, habit_id: &str, date: NaiveDate, value: impl Into<LogValue>) {
        let key = format_date(date);
        match value.into() {
            LogValue::Bool(false) => {
                if let Some(entry) = self.0.get_mut(&key) {
                    entry.remove(habit_id);
                    if entry.is_empty() {
                        self.0.remove(&key);
                    }
                }
            }
            value => {
                self.0.entry(key).or_default().insert(habit_id, value);
            }
        }
    }

    pub fn set_mood(&mut self, date: NaiveDate, mood: i64) -> Result<(), ValidationError> {
        if !(1..=5).contains(&mood) {
            return Err(ValidationError::MoodOutOfRange(mood));
        }
        self.toggle(MOOD_KEY, date, mood);
        Ok(())
    }

    pub fn clear_mood(&mut self, date: NaiveDate) {
        self.toggle(MOOD_KEY, date, false);
    }

    /// The `n` most recent well-formed dates with an entry, newest first.
    pub fn recent_days(&self, n: usize) -> Vec<(NaiveDate, &DayEntry)> {
        self.0
            .iter()
            .rev()
            .filter_map(|(k, v)| parse_date(k).ok().map(|d| (d, v)))
            .take(n)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DayEntry)> {
        self.0.iter()
    }

    pub(crate) fn insert_raw(&mut self, key: String, entry: DayEntry) {
        if !entry.is_empty() {
            self.0.insert(key, entry);
        }
    }
}

impl FromIterator<(String, DayEntry)> for DailyLog {
    fn from_iter<I: IntoIterator<Item = (String, DayEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
