//! Scoring and aggregation engine.
//!
//! Pure functions over `(habits, log, reference date)`. Nothing here reads
//! the clock, touches storage, or mutates its inputs, so every result is
//! reproducible from the same snapshot.
//!
//! ## Polarity
//!
//! Whether a logged entry is good news depends only on `unit` and
//! `category`:
//!
//! | Habit | Logged means | Success when |
//! |-------|--------------|--------------|
//! | `unit = max_x` | limit exceeded | not logged |
//! | Vices, not `max_x` | abstained | logged |
//! | anything else | done | logged |
//!
//! ## Daily score
//!
//! ```text
//! score = min(100, round(achieved / total * 100))
//! ```
//!
//! `total` sums the weights of daily habits only. Weekly habits logged on the
//! scored day add their weight to `achieved` as a bonus, so the raw ratio may
//! exceed 1 before the cap.

mod balance;
mod daily;
mod grid;
mod streak;
mod weekly;

pub use balance::CategoryScore;
pub use daily::DayTally;
pub use grid::{GridBucket, GridCell, GridThresholds, DEFAULT_GRID_DAYS};
pub use weekly::WeeklyProgress;

use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::log::DayEntry;

/// Default look-back limit for the streak walk.
pub const DEFAULT_STREAK_LOOKBACK_DAYS: u32 = 365;

/// Explicit choices the engine would otherwise have to guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Count disabled habits in denominators and bonuses.
    #[serde(default)]
    pub include_disabled: bool,
    /// Add the weekly-habit bonus to each day of the weekly average.
    #[serde(default = "default_true")]
    pub weekly_bonus_in_average: bool,
    /// Days the streak walk looks back; values below 1 are read as 1.
    #[serde(default = "default_lookback")]
    pub streak_lookback_days: u32,
}

fn default_true() -> bool {
    true
}

fn default_lookback() -> u32 {
    DEFAULT_STREAK_LOOKBACK_DAYS
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            include_disabled: false,
            weekly_bonus_in_average: true,
            streak_lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
        }
    }
}

/// Whether `habit` counts as achieved on a day with `entry` (or no entry).
pub fn is_successful(habit: &Habit, entry: Option<&DayEntry>) -> bool {
    let logged = entry.is_some_and(|e| e.is_logged(&habit.id));
    if habit.is_max_type() {
        !logged
    } else {
        logged
    }
}

/// `round(part / whole * 100)` clamped to 0..=100; 0 when `whole` is not
/// positive.
pub(crate) fn percent(part: f64, whole: f64) -> u32 {
    if whole.is_nan() || whole <= 0.0 || !part.is_finite() {
        return 0;
    }
    let pct = (part / whole * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Scoring entry point holding the active policy.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    policy: ScoringPolicy,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Habits that take part in scoring under the current policy.
    pub(crate) fn active<'a>(&self, habits: &'a [Habit]) -> impl Iterator<Item = &'a Habit> + 'a {
        let include_disabled = self.policy.include_disabled;
        habits.iter().filter(move |h| include_disabled || h.enabled)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::catalog::{Category, FrequencyType, Unit};
    use crate::log::DailyLog;

    #[test]
    fn percent_guards_division() {
        assert_eq!(percent(3.0, 0.0), 0);
        assert_eq!(percent(f64::NAN, 4.0), 0);
        assert_eq!(percent(1.0, f64::NAN), 0);
        assert_eq!(percent(1.0, 8.0), 13);
        assert_eq!(percent(9.0, 4.0), 100);
    }

    #[test]
    fn polarity_table() {
        let date = d("2024-05-01");
        let mut log = DailyLog::new();
        log.toggle("limit", date, true);
        log.toggle("abstain", date, true);
        log.toggle("plain", date, true);
        let entry = log.day(date);

        let limit = habit("limit", FrequencyType::Daily, Unit::MaxCount, 2);
        let mut abstain = daily("abstain", 3);
        abstain.category = Category::Vices;
        let plain = daily("plain", 1);
        let missing = daily("missing", 1);
        let untouched_limit = habit("other_limit", FrequencyType::Daily, Unit::MaxCount, 2);

        assert!(!is_successful(&limit, entry));
        assert!(is_successful(&abstain, entry));
        assert!(is_successful(&plain, entry));
        assert!(!is_successful(&missing, entry));
        assert!(is_successful(&untouched_limit, entry));
        assert!(is_successful(&untouched_limit, None));
    }

    #[test]
    fn policy_round_trips_through_toml() {
        let p = ScoringPolicy::default();
        let s = toml::to_string(&p).unwrap();
        let back: ScoringPolicy = toml::from_str(&s).unwrap();
        assert_eq!(back, p);
        let partial: ScoringPolicy = toml::from_str("include_disabled = true").unwrap();
        assert!(partial.include_disabled);
        assert!(partial.weekly_bonus_in_average);
    }
}
