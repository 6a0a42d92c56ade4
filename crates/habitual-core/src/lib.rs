//! # Habitual Core Library
//!
//! This library provides the core business logic for Habitual, a personal
//! habit tracker. It follows a CLI-first philosophy: every operation is
//! available through the standalone `habitual` binary, which is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: read-only habit templates
//! - **Habits / Log**: the user's editable habit list and sparse daily log
//! - **Scoring Engine**: pure functions turning `(habits, log, date)` into
//!   scores, streaks, weekly progress and category balance
//! - **Analytics**: chart and KPI projections over the engine
//! - **Storage**: SQLite persistence, JSON backups and TOML configuration
//!
//! ## Key Components
//!
//! - [`ScoringEngine`]: daily score, weekly average, streak and friends
//! - [`HabitList`] and [`DailyLog`]: the data the engine reads
//! - [`Database`]: profile, habit and log persistence
//! - [`Config`]: application configuration management

pub mod analytics;
pub mod catalog;
pub mod coach;
pub mod date;
pub mod error;
pub mod habit;
pub mod log;
pub mod onboarding;
pub mod scoring;
pub mod social;
pub mod storage;
pub mod sync;

pub use analytics::{Analytics, AnalyticsSettings, AnalyticsSummary, WeeklyStatus};
pub use catalog::{Category, FrequencyType, HabitTemplate, TimeOfDay, Unit};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{CustomHabit, Habit, HabitList};
pub use log::{DailyLog, DayEntry, LogValue};
pub use onboarding::{SurveyAnswers, UserProfile};
pub use scoring::{ScoringEngine, ScoringPolicy};
pub use storage::{BackupData, Config, Database};
