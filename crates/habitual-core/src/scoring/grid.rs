use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ScoringEngine;
use crate::date::{format_date, trailing_window};
use crate::habit::Habit;
use crate::log::DailyLog;

/// Default trailing window for the contribution grid.
pub const DEFAULT_GRID_DAYS: u32 = 28;

/// Intensity tier of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridBucket {
    Lowest,
    Low,
    Medium,
    High,
}

/// Upper bounds (inclusive) of the lower three tiers, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridThresholds {
    pub lowest: f64,
    pub low: f64,
    pub medium: f64,
}

impl Default for GridThresholds {
    fn default() -> Self {
        Self {
            lowest: 0.10,
            low: 0.50,
            medium: 0.85,
        }
    }
}

impl GridThresholds {
    pub fn bucket(&self, fraction: f64) -> GridBucket {
        if fraction.is_nan() || fraction <= self.lowest {
            GridBucket::Lowest
        } else if fraction <= self.low {
            GridBucket::Low
        } else if fraction <= self.medium {
            GridBucket::Medium
        } else {
            GridBucket::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: String,
    pub bucket: GridBucket,
}

impl ScoringEngine {
    /// Heatmap cells for the `window_days` days ending at `reference`,
    /// oldest first. Each cell uses the daily-habit fraction only; weekly
    /// bonuses do not light up the grid.
    pub fn contribution_grid(
        &self,
        habits: &[Habit],
        log: &DailyLog,
        reference: NaiveDate,
        window_days: u32,
        thresholds: &GridThresholds,
    ) -> Vec<GridCell> {
        trailing_window(reference, window_days)
            .into_iter()
            .map(|date| {
                let fraction = self.tally_day(habits, log, date, false).fraction();
                GridCell {
                    date: format_date(date),
                    bucket: thresholds.bucket(fraction),
                }
            })
            .collect()
    }
}
