//! Presentation adapters over the scoring engine.
//!
//! These project engine outputs into the shapes the dashboard and analytics
//! views chart: a daily consistency series with mood overlay, KPI figures,
//! weekly progress rows, the category radar and the contribution grid.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{format_date, trailing_window};
use crate::habit::Habit;
use crate::log::DailyLog;
use crate::scoring::{CategoryScore, GridCell, GridThresholds, ScoringEngine, WeeklyProgress};

/// Mood is stored on a 1-5 scale and charted on 0-100.
const MOOD_SCALE: f64 = 20.0;

/// Analytics window settings, stored as the `[analytics]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_grid_days")]
    pub grid_days: u32,
    #[serde(default = "default_perfect_day_threshold")]
    pub perfect_day_threshold: u32,
    #[serde(default)]
    pub grid_thresholds: GridThresholds,
}

fn default_window_days() -> u32 {
    7
}
fn default_grid_days() -> u32 {
    crate::scoring::DEFAULT_GRID_DAYS
}
fn default_perfect_day_threshold() -> u32 {
    90
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            grid_days: default_grid_days(),
            perfect_day_threshold: default_perfect_day_threshold(),
            grid_thresholds: GridThresholds::default(),
        }
    }
}

/// One bar of the consistency chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyPoint {
    pub date: String,
    /// `DD/MM` axis label.
    pub label: String,
    pub score: u32,
    /// Mood scaled to 0-100, absent when not logged.
    pub mood: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeeklyStatus {
    OnTrack,
    GoalMet,
    OverLimit,
}

impl From<&WeeklyProgress> for WeeklyStatus {
    fn from(progress: &WeeklyProgress) -> Self {
        if progress.over_limit() {
            WeeklyStatus::OverLimit
        } else if progress.goal_met() {
            WeeklyStatus::GoalMet
        } else {
            WeeklyStatus::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgressRow {
    pub habit_id: String,
    pub title: String,
    pub count: u32,
    pub target_count: u32,
    pub is_max_type: bool,
    pub ratio: f64,
    pub status: WeeklyStatus,
}

/// Everything the analytics view shows for one reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub reference: String,
    pub daily_score: u32,
    pub weekly_average: u32,
    pub streak: u32,
    pub overall_consistency: u32,
    pub perfect_days: u32,
    pub consistency: Vec<ConsistencyPoint>,
    pub balance: Vec<CategoryScore>,
    pub weekly: Vec<WeeklyProgressRow>,
}

/// Adapter bundling the engine with window settings.
#[derive(Debug, Clone, Default)]
pub struct Analytics {
    engine: ScoringEngine,
    settings: AnalyticsSettings,
}

impl Analytics {
    pub fn new(engine: ScoringEngine, settings: AnalyticsSettings) -> Self {
        Self { engine, settings }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Daily-only scores (no weekly bonus) for the window ending at
    /// `reference`, oldest first.
    pub fn consistency_series(
        &self,
        habits: &[Habit],
        log: &DailyLog,
        reference: NaiveDate,
    ) -> Vec<ConsistencyPoint> {
        trailing_window(reference, self.settings.window_days)
            .into_iter()
            .map(|date| ConsistencyPoint {
                date: format_date(date),
                label: format!("{:02}/{:02}", date.day(), date.month()),
                score: self.engine.tally_day(habits, log, date, false).score(),
                mood: log
                    .mood(date)
                    .filter(|m| *m > 0.0)
                    .map(|m| (m * MOOD_SCALE).round().clamp(0.0, 100.0) as u32),
            })
            .collect()
    }

    /// `round(sum / window_days)`; 0 for an empty window.
    pub fn overall_consistency(&self, series: &[ConsistencyPoint]) -> u32 {
        let days = self.settings.window_days;
        if days == 0 {
            return 0;
        }
        let sum: u32 = series.iter().map(|p| p.score).sum();
        (sum as f64 / days as f64).round() as u32
    }

    pub fn perfect_days(&self, series: &[ConsistencyPoint]) -> u32 {
        series
            .iter()
            .filter(|p| p.score >= self.settings.perfect_day_threshold)
            .count() as u32
    }

    /// Progress rows for every active weekly habit, in list order.
    pub fn weekly_rows(
        &self,
        habits: &[Habit],
        log: &DailyLog,
        reference: NaiveDate,
    ) -> Vec<WeeklyProgressRow> {
        self.engine
            .active(habits)
            .filter(|h| h.is_weekly())
            .map(|habit| {
                let progress = self.engine.weekly_progress(habit, log, reference);
                WeeklyProgressRow {
                    habit_id: progress.habit_id.clone(),
                    title: habit.title.clone(),
                    count: progress.count,
                    target_count: progress.target_count,
                    is_max_type: progress.is_max_type,
                    ratio: progress.ratio(),
                    status: WeeklyStatus::from(&progress),
                }
            })
            .collect()
    }

    pub fn balance(&self, habits: &[Habit], log: &DailyLog, reference: NaiveDate) -> Vec<CategoryScore> {
        self.engine
            .category_balance(habits, log, reference, self.settings.window_days)
    }

    pub fn grid(&self, habits: &[Habit], log: &DailyLog, reference: NaiveDate) -> Vec<GridCell> {
        self.engine.contribution_grid(
            habits,
            log,
            reference,
            self.settings.grid_days,
            &self.settings.grid_thresholds,
        )
    }

    pub fn summary(&self, habits: &[Habit], log: &DailyLog, reference: NaiveDate) -> AnalyticsSummary {
        let consistency = self.consistency_series(habits, log, reference);
        AnalyticsSummary {
            reference: format_date(reference),
            daily_score: self.engine.daily_score(habits, log, reference),
            weekly_average: self.engine.weekly_average(habits, log, reference),
            streak: self.engine.streak(log, reference),
            overall_consistency: self.overall_consistency(&consistency),
            perfect_days: self.perfect_days(&consistency),
            balance: self.balance(habits, log, reference),
            weekly: self.weekly_rows(habits, log, reference),
            consistency,
        }
    }
}
