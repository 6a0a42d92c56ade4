use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ScoringEngine;
use crate::date::{days_after, week_start};
use crate::habit::Habit;
use crate::log::DailyLog;

/// How far a weekly habit has come in the current Sunday-start week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub habit_id: String,
    /// Days in the week with a truthy entry.
    pub count: u32,
    pub target_count: u32,
    /// Limit habit: exceeding the target is bad rather than good.
    pub is_max_type: bool,
}

impl WeeklyProgress {
    /// Ordinary habit that reached its target.
    pub fn goal_met(&self) -> bool {
        !self.is_max_type && self.count >= self.target_count.max(1)
    }

    /// Limit habit logged more often than allowed.
    pub fn over_limit(&self) -> bool {
        self.is_max_type && self.count > self.target_count
    }

    /// Fill level for a progress bar, 0.0..=1.0.
    pub fn ratio(&self) -> f64 {
        if self.target_count == 0 {
            return if self.count > 0 { 1.0 } else { 0.0 };
        }
        (self.count as f64 / self.target_count as f64).min(1.0)
    }
}

impl ScoringEngine {
    /// Average daily score from Sunday through `reference` inclusive.
    ///
    /// Days without any log keys are left out of the average rather than
    /// counted as zero, so early in the week the figure rests on fewer days.
    /// Returns 0 when no day qualifies.
    pub fn weekly_average(&self, habits: &[Habit], log: &DailyLog, reference: NaiveDate) -> u32 {
        let bonus = self.policy().weekly_bonus_in_average;
        let mut date = week_start(reference);
        let mut sum = 0u32;
        let mut days = 0u32;

        while date <= reference {
            if let Some(entry) = log.day(date).filter(|e| !e.is_empty()) {
                let tally = self.tally_day(habits, log, date, bonus);
                if tally.total_weight > 0 {
                    if tally.achieved_weight > tally.total_weight {
                        tracing::debug!(
                            %date,
                            keys = entry.len(),
                            achieved = tally.achieved_weight,
                            total = tally.total_weight,
                            "daily score capped at 100"
                        );
                    }
                    sum += tally.score();
                    days += 1;
                }
            }
            if date == NaiveDate::MAX {
                break;
            }
            date = days_after(date, 1);
        }

        if days == 0 {
            return 0;
        }
        super::percent(sum as f64, days as f64 * 100.0)
    }

    /// Count of logged days for `habit` in the Sunday-start week containing
    /// `reference`, all seven days included.
    pub fn weekly_progress(&self, habit: &Habit, log: &DailyLog, reference: NaiveDate) -> WeeklyProgress {
        let start = week_start(reference);
        let count = (0..7)
            .map(|i| days_after(start, i))
            .filter(|&date| log.is_logged(&habit.id, date))
            .count() as u32;

        WeeklyProgress {
            habit_id: habit.id.clone(),
            count,
            target_count: habit.target_count,
            is_max_type: habit.is_max_type(),
        }
    }
}
