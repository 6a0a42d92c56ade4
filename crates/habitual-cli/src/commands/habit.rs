//! Habit list management commands for CLI.

use clap::{Subcommand, ValueEnum};
use habitual_core::storage::Database;
use habitual_core::sync::{outdated, sync_with_catalog};
use habitual_core::{Category, CustomHabit, FrequencyType, TimeOfDay};
use serde_json::json;

use super::{print_json, CmdResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum Step {
    Up,
    Down,
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// List the user's habits
    List {
        /// Only enabled habits
        #[arg(long)]
        enabled: bool,
    },
    /// Catalog templates not yet added
    Catalog {
        /// Case-insensitive filter on title and description
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a catalog template by id
    Add {
        /// Template ID
        id: String,
    },
    /// Create a custom habit
    Create {
        /// Habit title
        title: String,
        /// body, mind, vices, social or environment
        #[arg(long, default_value = "body")]
        category: Category,
        /// daily or weekly
        #[arg(long, default_value = "daily")]
        frequency: FrequencyType,
        /// Weekly target (ignored for daily habits)
        #[arg(long, default_value = "1")]
        target: u32,
        /// Priority weight 1-3
        #[arg(long, default_value = "2")]
        weight: u8,
        /// morning, afternoon, evening or any
        #[arg(long, default_value = "morning")]
        time: TimeOfDay,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a habit
    Remove {
        /// Habit ID
        id: String,
    },
    /// Enable a habit
    Enable {
        /// Habit ID
        id: String,
    },
    /// Disable a habit
    Disable {
        /// Habit ID
        id: String,
    },
    /// Cycle priority low -> medium -> high, or set it
    Priority {
        /// Habit ID
        id: String,
        /// Explicit weight 1-3
        #[arg(long)]
        set: Option<u8>,
    },
    /// Cycle time of day
    Time {
        /// Habit ID
        id: String,
    },
    /// Switch between daily and weekly
    Frequency {
        /// Habit ID
        id: String,
    },
    /// Raise or lower the weekly target
    Target {
        /// Habit ID
        id: String,
        #[arg(value_enum)]
        step: Step,
    },
    /// Refresh habit texts from the catalog
    Sync,
    /// List habits whose texts differ from the catalog
    Outdated,
}

pub fn run(action: HabitAction) -> CmdResult {
    let mut db = Database::open()?;
    let mut habits = db.load_habits()?;

    match action {
        HabitAction::List { enabled } => {
            let list: Vec<_> = habits.iter().filter(|h| !enabled || h.enabled).collect();
            return print_json(&list);
        }
        HabitAction::Catalog { search } => {
            return print_json(&habits.available_from_catalog(&search));
        }
        HabitAction::Outdated => {
            return print_json(&outdated(habits.as_slice()));
        }
        HabitAction::Add { id } => {
            let added = habits.add_from_catalog(&id)?;
            db.save_habits(&habits)?;
            print_json(&json!({ "id": id, "added": added }))?;
        }
        HabitAction::Create {
            title,
            category,
            frequency,
            target,
            weight,
            time,
            description,
        } => {
            let id = habits.create_custom(CustomHabit {
                title,
                category,
                frequency_type: frequency,
                target_count: target,
                weight,
                time_of_day: time,
                description,
            })?;
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Remove { id } => {
            let removed = habits.remove(&id)?;
            db.save_habits(&habits)?;
            print_json(&removed)?;
        }
        HabitAction::Enable { id } => {
            habits.set_enabled(&id, true)?;
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Disable { id } => {
            habits.set_enabled(&id, false)?;
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Priority { id, set } => {
            match set {
                Some(weight) => habits.set_weight(&id, weight)?,
                None => {
                    habits.cycle_priority(&id)?;
                }
            }
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Time { id } => {
            habits.cycle_time_of_day(&id)?;
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Frequency { id } => {
            habits.toggle_frequency(&id)?;
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Target { id, step } => {
            match step {
                Step::Up => habits.increment_target(&id)?,
                Step::Down => habits.decrement_target(&id)?,
            };
            db.save_habits(&habits)?;
            print_json(&habits.get(&id))?;
        }
        HabitAction::Sync => {
            let changed = sync_with_catalog(&mut habits);
            db.save_habits(&habits)?;
            print_json(&json!({ "changed": changed }))?;
        }
    }
    Ok(())
}
