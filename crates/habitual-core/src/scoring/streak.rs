use chrono::NaiveDate;

use super::ScoringEngine;
use crate::date::days_before;
use crate::log::DailyLog;

impl ScoringEngine {
    /// Consecutive active days ending at `reference`.
    ///
    /// A day is active when it holds a `true` or numeric value; a mood entry
    /// alone keeps the streak. `reference` itself may still be empty (today
    /// not logged yet), but any earlier inactive day ends the walk.
    pub fn streak(&self, log: &DailyLog, reference: NaiveDate) -> u32 {
        let mut streak = 0;

        for i in 0..self.policy().streak_lookback_days.max(1) {
            let date = days_before(reference, i as u64);
            if log.day(date).is_some_and(|e| e.has_activity()) {
                streak += 1;
            } else if i > 0 {
                break;
            }
            if date == NaiveDate::MIN {
                break;
            }
        }
        streak
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::scoring::ScoringPolicy;

    fn log_from(json: &str) -> DailyLog {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_day_before_today_stops_the_walk() {
        let log = log_from(r#"{"2024-01-01":{"mood":4},"2024-01-02":{},"2024-01-03":{"h1":true}}"#);
        assert_eq!(ScoringEngine::new().streak(&log, d("2024-01-03")), 1);
    }

    #[test]
    fn today_may_be_unlogged() {
        let log = log_from(r#"{"2024-01-01":{"a":true},"2024-01-02":{"mood":2}}"#);
        assert_eq!(ScoringEngine::new().streak(&log, d("2024-01-03")), 2);
    }

    #[test]
    fn today_with_only_false_values_is_exempt() {
        let log = log_from(r#"{"2024-01-02":{"a":true},"2024-01-03":{"a":false}}"#);
        assert_eq!(ScoringEngine::new().streak(&log, d("2024-01-03")), 1);
    }

    #[test]
    fn gap_before_today_resets() {
        let log = log_from(r#"{"2024-01-01":{"a":true},"2024-01-03":{"a":true}}"#);
        assert_eq!(ScoringEngine::new().streak(&log, d("2024-01-04")), 0);
    }

    #[test]
    fn no_log_is_zero() {
        assert_eq!(ScoringEngine::new().streak(&DailyLog::new(), d("2024-01-04")), 0);
    }

    #[test]
    fn lookback_bounds_the_walk() {
        let mut log = DailyLog::new();
        for i in 0..20 {
            log.toggle("a", days_before(d("2024-03-01"), i), true);
        }
        let engine = ScoringEngine::with_policy(ScoringPolicy {
            streak_lookback_days: 7,
            ..Default::default()
        });
        assert_eq!(engine.streak(&log, d("2024-03-01")), 7);
        assert_eq!(ScoringEngine::new().streak(&log, d("2024-03-01")), 20);
    }

    #[test]
    fn zero_lookback_still_counts_reference_day() {
        let log = log_from(r#"{"2024-01-03":{"a":true}}"#);
        let engine = ScoringEngine::with_policy(ScoringPolicy {
            streak_lookback_days: 0,
            ..Default::default()
        });
        assert_eq!(engine.streak(&log, d("2024-01-03")), 1);
    }
}
