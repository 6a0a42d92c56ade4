use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{is_successful, percent, ScoringEngine};
use crate::catalog::Category;
use crate::date::trailing_window;
use crate::habit::Habit;
use crate::log::DailyLog;

/// Weighted performance of one life area over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Short axis label.
    pub label: String,
    pub score: u32,
}

impl ScoringEngine {
    /// Score every category over the `window_days` days ending at
    /// `reference`, in [`Category::ALL`] order.
    ///
    /// Daily habits are worth `weight` per day. A weekly habit is one event
    /// worth `weight`: ordinary habits earn it in proportion to
    /// `count / target` (capped at 1), limit habits earn all of it while
    /// `count <= target`.
    pub fn category_balance(
        &self,
        habits: &[Habit],
        log: &DailyLog,
        reference: NaiveDate,
        window_days: u32,
    ) -> Vec<CategoryScore> {
        let days = trailing_window(reference, window_days);

        Category::ALL
            .iter()
            .map(|&category| {
                let mut potential = 0.0;
                let mut earned = 0.0;

                for habit in self.active(habits).filter(|h| h.category == category) {
                    let weight = habit.effective_weight() as f64;
                    if habit.is_daily() {
                        for &day in &days {
                            potential += weight;
                            if is_successful(habit, log.day(day)) {
                                earned += weight;
                            }
                        }
                    } else {
                        potential += weight;
                        let count = days.iter().filter(|&&day| log.is_logged(&habit.id, day)).count();
                        earned += weight * weekly_share(habit, count as u32);
                    }
                }

                CategoryScore {
                    category,
                    label: category.short_label().to_string(),
                    score: percent(earned, potential),
                }
            })
            .collect()
    }
}

/// Fraction of a weekly habit's weight earned with `count` logged days.
fn weekly_share(habit: &Habit, count: u32) -> f64 {
    let target = habit.target_count;
    if habit.is_max_type() {
        return if count <= target { 1.0 } else { 0.0 };
    }
    if target == 0 {
        return if count > 0 { 1.0 } else { 0.0 };
    }
    (count as f64 / target as f64).min(1.0)
}
