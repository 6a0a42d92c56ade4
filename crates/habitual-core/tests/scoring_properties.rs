//! Property tests for the scoring engine.
//!
//! Habit lists are kept small (at most 12 habits, weights up to 3) so a
//! single missed habit can never round up to a perfect score.

use chrono::NaiveDate;
use habitual_core::catalog::{Category, FrequencyType, TimeOfDay, Unit};
use habitual_core::date::days_after;
use habitual_core::scoring::is_successful;
use habitual_core::{DailyLog, Habit, ScoringEngine};
use proptest::prelude::*;

// --- STRATEGIES ---

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_unit() -> impl Strategy<Value = Unit> {
    prop_oneof![Just(Unit::Check), Just(Unit::Count), Just(Unit::MaxCount)]
}

prop_compose! {
    fn arb_habit()(
        weekly in any::<bool>(),
        unit in arb_unit(),
        category in arb_category(),
        weight in 0u8..6,
        target in 0u32..8,
        enabled in any::<bool>()
    ) -> Habit {
        Habit {
            id: String::new(),
            title: "prop".to_string(),
            category,
            frequency_type: if weekly { FrequencyType::Weekly } else { FrequencyType::Daily },
            target_count: target,
            unit,
            weight,
            time_of_day: TimeOfDay::Any,
            description: None,
            science_tip: None,
            enabled,
            streak: 0,
            why_chosen: None,
        }
    }
}

prop_compose! {
    fn arb_habits()(habits in prop::collection::vec(arb_habit(), 0..12)) -> Vec<Habit> {
        habits
            .into_iter()
            .enumerate()
            .map(|(i, mut h)| {
                h.id = format!("h{i}");
                h
            })
            .collect()
    }
}

fn start() -> NaiveDate {
    // A Sunday.
    NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
}

prop_compose! {
    /// Habits plus a 14-day log with arbitrary toggles and moods.
    fn arb_snapshot()(habits in arb_habits())(
        marks in prop::collection::vec(prop::collection::vec(any::<bool>(), habits.len()), 14),
        moods in prop::collection::vec(prop::option::of(1i64..=5), 14),
        habits in Just(habits.clone())
    ) -> (Vec<Habit>, DailyLog) {
        let mut log = DailyLog::new();
        for (day, row) in marks.iter().enumerate() {
            let date = days_after(start(), day as u64);
            for (habit, &logged) in habits.iter().zip(row) {
                if logged {
                    log.toggle(&habit.id, date, true);
                }
            }
            if let Some(mood) = moods[day] {
                log.set_mood(date, mood).unwrap();
            }
        }
        (habits, log)
    }
}

proptest! {
    #[test]
    fn prop_scores_stay_in_range((habits, log) in arb_snapshot(), offset in 0u64..14) {
        let engine = ScoringEngine::new();
        let date = days_after(start(), offset);
        prop_assert!(engine.daily_score(&habits, &log, date) <= 100);
        prop_assert!(engine.weekly_average(&habits, &log, date) <= 100);
        for cat in engine.category_balance(&habits, &log, date, 7) {
            prop_assert!(cat.score <= 100);
        }
        prop_assert!(engine.streak(&log, date) <= offset as u32 + 1);
    }

    #[test]
    fn prop_perfect_iff_every_daily_habit_succeeds((habits, log) in arb_snapshot(), offset in 0u64..14) {
        let engine = ScoringEngine::new();
        let date = days_after(start(), offset);
        let tally = engine.tally_day(&habits, &log, date, false);
        prop_assume!(tally.total_weight > 0);

        let all_ok = habits
            .iter()
            .filter(|h| h.enabled && h.is_daily())
            .all(|h| is_successful(h, log.day(date)));
        prop_assert_eq!(tally.score() == 100, all_ok);
    }

    #[test]
    fn prop_bonus_never_exceeds_cap((habits, log) in arb_snapshot(), offset in 0u64..14) {
        let engine = ScoringEngine::new();
        let date = days_after(start(), offset);
        let tally = engine.tally_day(&habits, &log, date, true);
        if tally.total_weight > 0 && tally.achieved_weight >= tally.total_weight {
            prop_assert_eq!(engine.daily_score(&habits, &log, date), 100);
        }
    }

    #[test]
    fn prop_scoring_is_idempotent((habits, log) in arb_snapshot(), offset in 0u64..14) {
        let engine = ScoringEngine::new();
        let date = days_after(start(), offset);
        let before = log.clone();
        prop_assert_eq!(
            engine.daily_score(&habits, &log, date),
            engine.daily_score(&habits, &log, date)
        );
        prop_assert_eq!(
            engine.category_balance(&habits, &log, date, 7),
            engine.category_balance(&habits, &log, date, 7)
        );
        prop_assert_eq!(engine.streak(&log, date), engine.streak(&log, date));
        prop_assert_eq!(log, before);
    }

    #[test]
    fn prop_toggle_off_restores_log((habits, log) in arb_snapshot(), offset in 0u64..14) {
        let engine = ScoringEngine::new();
        let date = days_after(start(), offset);
        let mut toggled = log.clone();
        toggled.toggle("fresh_habit", date, true);
        toggled.toggle("fresh_habit", date, false);
        prop_assert_eq!(&toggled, &log);
        prop_assert_eq!(
            engine.daily_score(&habits, &toggled, date),
            engine.daily_score(&habits, &log, date)
        );
    }
}
