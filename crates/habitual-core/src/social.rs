//! Public stats and leaderboard ranking.
//!
//! Fetching friends or groups is someone else's job; this module only
//! derives the figures a user publishes and orders entries for display.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::log::DailyLog;
use crate::scoring::ScoringEngine;

/// Figures a user shares with friends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicStats {
    pub score: u32,
    pub streak: u32,
}

impl PublicStats {
    /// Clamp a raw score into 0..=100.
    pub fn new(score: i64, streak: u32) -> Self {
        Self {
            score: score.clamp(0, 100) as u32,
            streak,
        }
    }

    /// Weekly average and derived streak as of `reference`.
    pub fn compute(engine: &ScoringEngine, habits: &[Habit], log: &DailyLog, reference: NaiveDate) -> Self {
        Self {
            score: engine.weekly_average(habits, log, reference),
            streak: engine.streak(log, reference),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub is_me: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

fn compare(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.streak.cmp(&a.streak))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Order by score, then streak, both descending, then name. Scores are
/// clamped to 0..=100 first. Equal score and streak share a rank.
pub fn rank(entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    let mut entries: Vec<LeaderboardEntry> = entries
        .into_iter()
        .map(|mut e| {
            e.score = e.score.clamp(0, 100);
            e
        })
        .collect();
    entries.sort_by(compare);

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.entry.score == entry.score && prev.entry.streak == entry.streak => prev.rank,
            _ => i as u32 + 1,
        };
        ranked.push(RankedEntry { rank, entry });
    }
    ranked
}
