use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{is_successful, percent, ScoringEngine};
use crate::habit::Habit;
use crate::log::DailyLog;

/// Raw weights behind one day's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    /// Sum of daily-habit weights.
    pub total_weight: u32,
    /// Weight of successful daily habits plus any weekly bonus.
    pub achieved_weight: u32,
}

impl DayTally {
    /// Percentage in 0..=100; 0 when there is nothing to score.
    pub fn score(&self) -> u32 {
        percent(self.achieved_weight as f64, self.total_weight as f64)
    }

    /// Uncapped achieved/total ratio; 0 when there is nothing to score.
    pub fn fraction(&self) -> f64 {
        if self.total_weight == 0 {
            0.0
        } else {
            self.achieved_weight as f64 / self.total_weight as f64
        }
    }
}

impl ScoringEngine {
    /// Sum weights for `date`.
    ///
    /// With `weekly_bonus`, each weekly habit logged on `date` adds its weight
    /// to the achieved side only, limit habits included.
    pub fn tally_day(
        &self,
        habits: &[Habit],
        log: &DailyLog,
        date: NaiveDate,
        weekly_bonus: bool,
    ) -> DayTally {
        let entry = log.day(date);
        let mut tally = DayTally::default();

        for habit in self.active(habits) {
            let weight = habit.effective_weight();
            if habit.is_daily() {
                tally.total_weight += weight;
                if is_successful(habit, entry) {
                    tally.achieved_weight += weight;
                }
            } else if weekly_bonus && entry.is_some_and(|e| e.is_logged(&habit.id)) {
                tally.achieved_weight += weight;
            }
        }
        tally
    }

    /// Weighted score for a single day, weekly bonus included.
    pub fn daily_score(&self, habits: &[Habit], log: &DailyLog, date: NaiveDate) -> u32 {
        self.tally_day(habits, log, date, true).score()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::catalog::{Category, FrequencyType, Unit};
    use crate::scoring::ScoringPolicy;

    fn protocol() -> Vec<Habit> {
        vec![daily("daily1", 2), daily("daily2", 2), weekly("weekly1", 1, 2)]
    }

    #[test]
    fn half_of_daily_habits() {
        let mut log = DailyLog::new();
        log.toggle("daily1", d("2023-10-27"), true);
        assert_eq!(ScoringEngine::new().daily_score(&protocol(), &log, d("2023-10-27")), 50);
    }

    #[test]
    fn all_daily_habits() {
        let mut log = DailyLog::new();
        log.toggle("daily1", d("2023-10-27"), true);
        log.toggle("daily2", d("2023-10-27"), true);
        assert_eq!(ScoringEngine::new().daily_score(&protocol(), &log, d("2023-10-27")), 100);
    }

    #[test]
    fn weekly_bonus_is_capped() {
        let date = d("2023-10-27");
        let mut log = DailyLog::new();
        log.toggle("daily1", date, true);
        log.toggle("daily2", date, true);
        log.toggle("weekly1", date, 1i64);
        let engine = ScoringEngine::new();
        let tally = engine.tally_day(&protocol(), &log, date, true);
        assert_eq!(tally, DayTally { total_weight: 4, achieved_weight: 6 });
        assert_eq!(engine.daily_score(&protocol(), &log, date), 100);
    }

    #[test]
    fn weekly_bonus_recovers_missed_daily() {
        let date = d("2023-10-27");
        let mut log = DailyLog::new();
        log.toggle("daily1", date, true);
        log.toggle("weekly1", date, 1i64);
        assert_eq!(ScoringEngine::new().daily_score(&protocol(), &log, date), 100);
    }

    #[test]
    fn no_habits_scores_zero() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.daily_score(&[], &DailyLog::new(), d("2024-01-01")), 0);
        // Weekly-only protocol has no denominator either.
        let mut log = DailyLog::new();
        log.toggle("w", d("2024-01-01"), true);
        assert_eq!(engine.daily_score(&[weekly("w", 3, 3)], &log, d("2024-01-01")), 0);
    }

    #[test]
    fn limit_habit_contributes_only_when_not_logged() {
        let date = d("2024-01-01");
        let limit = habit("limit", FrequencyType::Daily, Unit::MaxCount, 2);
        assert!(!limit.is_abstinence());
        let engine = ScoringEngine::new();

        let tally = engine.tally_day(&[limit.clone()], &DailyLog::new(), date, true);
        assert_eq!(tally.achieved_weight, 2);

        let mut log = DailyLog::new();
        log.toggle("limit", date, true);
        let tally = engine.tally_day(&[limit], &log, date, true);
        assert_eq!(tally.achieved_weight, 0);
    }

    #[test]
    fn abstinence_logged_is_success() {
        let date = d("2024-01-01");
        let mut vice = daily("no_nicotine", 3);
        vice.category = Category::Vices;
        assert!(vice.is_abstinence());
        let mut log = DailyLog::new();
        log.toggle("no_nicotine", date, true);
        let tally = ScoringEngine::new().tally_day(&[vice], &log, date, true);
        assert_eq!(tally, DayTally { total_weight: 3, achieved_weight: 3 });
    }

    #[test]
    fn weekly_limit_habit_logged_today_earns_bonus() {
        let date = d("2024-01-10");
        let mut limit = weekly("limit_alcohol", 2, 2);
        limit.unit = Unit::MaxCount;
        let habits = vec![daily("a", 2), daily("b", 2), limit];
        let mut log = DailyLog::new();
        log.toggle("a", date, true);
        log.toggle("limit_alcohol", date, true);

        let engine = ScoringEngine::new();
        let tally = engine.tally_day(&habits, &log, date, true);
        assert_eq!(tally, DayTally { total_weight: 4, achieved_weight: 4 });
        assert_eq!(engine.daily_score(&habits, &log, date), 100);
    }

    #[test]
    fn disabled_habits_follow_policy() {
        let date = d("2024-01-01");
        let mut off = daily("off", 2);
        off.enabled = false;
        let habits = vec![daily("on", 2), off];
        let mut log = DailyLog::new();
        log.toggle("on", date, true);

        assert_eq!(ScoringEngine::new().daily_score(&habits, &log, date), 100);
        let inclusive = ScoringEngine::with_policy(ScoringPolicy {
            include_disabled: true,
            ..Default::default()
        });
        assert_eq!(inclusive.daily_score(&habits, &log, date), 50);
    }

    #[test]
    fn out_of_range_weight_counts_as_medium() {
        let date = d("2024-01-01");
        let mut odd = daily("odd", 0);
        odd.weight = 9;
        let mut log = DailyLog::new();
        log.toggle("odd", date, true);
        let tally = ScoringEngine::new().tally_day(&[odd, daily("b", 2)], &log, date, true);
        assert_eq!(tally, DayTally { total_weight: 4, achieved_weight: 2 });
    }

    #[test]
    fn untoggled_matches_never_toggled() {
        let date = d("2024-02-01");
        let habits = vec![daily("h1", 2), daily("h2", 1)];
        let mut toggled = DailyLog::new();
        toggled.toggle("h1", date, true);
        toggled.toggle("h1", date, false);

        let engine = ScoringEngine::new();
        assert_eq!(toggled, DailyLog::new());
        assert_eq!(
            engine.daily_score(&habits, &toggled, date),
            engine.daily_score(&habits, &DailyLog::new(), date)
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let date = d("2024-02-01");
        let habits = protocol();
        let mut log = DailyLog::new();
        log.toggle("daily2", date, true);
        let engine = ScoringEngine::new();
        let first = engine.daily_score(&habits, &log, date);
        assert_eq!(first, engine.daily_score(&habits, &log, date));
        assert_eq!(first, 50);
    }
}
