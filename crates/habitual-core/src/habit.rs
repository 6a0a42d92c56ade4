//! The user's personalized habit list.
//!
//! Each [`Habit`] starts as a copy of a catalog template (or a custom
//! definition) and is edited independently afterwards. Identity is by `id`;
//! [`HabitList`] keeps ids unique.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    self, default_target, default_weight, lenient_target, lenient_weight, Category,
    FrequencyType, HabitTemplate, TimeOfDay, Unit, DEFAULT_WEIGHT,
};
use crate::error::ValidationError;
use crate::log::MOOD_KEY;

fn default_true() -> bool {
    true
}

/// Upper bound for a weekly target set through the habit manager.
pub const MAX_WEEKLY_TARGET: u32 = 7;

/// Target assigned when a daily habit is switched to weekly.
pub const DEFAULT_WEEKLY_TARGET: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub frequency_type: FrequencyType,
    #[serde(default = "default_target", deserialize_with = "lenient_target")]
    pub target_count: u32,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default = "default_weight", deserialize_with = "lenient_weight")]
    pub weight: u8,
    #[serde(default)]
    pub time_of_day: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub science_tip: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cached display hint. The real streak is always derived from the log.
    #[serde(default)]
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_chosen: Option<String>,
}

impl Habit {
    pub fn from_template(template: &HabitTemplate) -> Self {
        Self {
            id: template.id.clone(),
            title: template.title.clone(),
            category: template.category,
            frequency_type: template.frequency_type,
            target_count: template.target_count,
            unit: template.unit,
            weight: template.weight,
            time_of_day: template.time_of_day,
            description: template.description.clone(),
            science_tip: template.science_tip.clone(),
            enabled: true,
            streak: 0,
            why_chosen: None,
        }
    }

    /// Weight as used by the scoring engine: 1..=3, anything else counts as 2.
    pub fn effective_weight(&self) -> u32 {
        match self.weight {
            1..=3 => self.weight as u32,
            _ => DEFAULT_WEIGHT as u32,
        }
    }

    pub fn is_daily(&self) -> bool {
        self.frequency_type == FrequencyType::Daily
    }

    pub fn is_weekly(&self) -> bool {
        self.frequency_type == FrequencyType::Weekly
    }

    pub fn is_max_type(&self) -> bool {
        self.unit == Unit::MaxCount
    }

    /// Abstinence habit: a vice the user checks off when they stayed clean.
    pub fn is_abstinence(&self) -> bool {
        self.category == Category::Vices && !self.is_max_type()
    }

    pub fn priority_label(&self) -> &'static str {
        match self.effective_weight() {
            3 => "high",
            1 => "low",
            _ => "medium",
        }
    }
}

/// Fields for a user-defined habit.
#[derive(Debug, Clone)]
pub struct CustomHabit {
    pub title: String,
    pub category: Category,
    pub frequency_type: FrequencyType,
    pub target_count: u32,
    pub weight: u8,
    pub time_of_day: TimeOfDay,
    pub description: Option<String>,
}

impl Default for CustomHabit {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: Category::Body,
            frequency_type: FrequencyType::Daily,
            target_count: 1,
            weight: DEFAULT_WEIGHT,
            time_of_day: TimeOfDay::Morning,
            description: None,
        }
    }
}

/// Owned habit list with the edit operations the settings screen exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitList {
    habits: Vec<Habit>,
}

impl HabitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing list, rejecting duplicate ids.
    pub fn from_vec(habits: Vec<Habit>) -> Result<Self, ValidationError> {
        let mut list = Self::new();
        for habit in habits {
            list.push(habit)?;
        }
        Ok(list)
    }

    pub fn as_slice(&self) -> &[Habit] {
        &self.habits
    }

    pub fn into_vec(self) -> Vec<Habit> {
        self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.habits.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Result<&mut Habit, ValidationError> {
        self.habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| ValidationError::UnknownHabit(id.to_string()))
    }

    /// Append a habit, enforcing unique non-reserved ids.
    pub fn push(&mut self, habit: Habit) -> Result<(), ValidationError> {
        if habit.id.trim().is_empty() || habit.id == MOOD_KEY {
            return Err(ValidationError::InvalidValue {
                field: "id".into(),
                message: format!("'{}' is not a valid habit id", habit.id),
            });
        }
        if self.contains(&habit.id) {
            return Err(ValidationError::DuplicateHabit(habit.id));
        }
        self.habits.push(habit);
        Ok(())
    }

    /// Instantiate a catalog template. Adding an id already in the list
    /// leaves the list untouched and returns `false`.
    pub fn add_from_catalog(&mut self, template_id: &str) -> Result<bool, ValidationError> {
        let template = catalog::template(template_id)
            .ok_or_else(|| ValidationError::UnknownTemplate(template_id.to_string()))?;
        if self.contains(template_id) {
            return Ok(false);
        }
        self.push(Habit::from_template(template))?;
        Ok(true)
    }

    /// Create a user-defined habit and return its generated id.
    pub fn create_custom(&mut self, custom: CustomHabit) -> Result<String, ValidationError> {
        let title = custom.title.trim();
        if title.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "title must not be empty".into(),
            });
        }
        if !(1..=3).contains(&custom.weight) {
            return Err(ValidationError::InvalidValue {
                field: "weight".into(),
                message: format!("{} is not one of 1, 2, 3", custom.weight),
            });
        }
        let unit = match custom.frequency_type {
            FrequencyType::Daily => Unit::Check,
            FrequencyType::Weekly => Unit::Count,
        };
        let id = format!("custom_{}", uuid::Uuid::new_v4().simple());
        self.push(Habit {
            id: id.clone(),
            title: title.to_string(),
            category: custom.category,
            frequency_type: custom.frequency_type,
            target_count: custom.target_count.max(1),
            unit,
            weight: custom.weight,
            time_of_day: custom.time_of_day,
            description: Some(
                custom
                    .description
                    .unwrap_or_else(|| "Custom habit".to_string()),
            ),
            science_tip: None,
            enabled: true,
            streak: 0,
            why_chosen: None,
        })?;
        Ok(id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Habit, ValidationError> {
        let idx = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| ValidationError::UnknownHabit(id.to_string()))?;
        Ok(self.habits.remove(idx))
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), ValidationError> {
        self.get_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Low -> Medium -> High -> Low.
    pub fn cycle_priority(&mut self, id: &str) -> Result<u8, ValidationError> {
        let habit = self.get_mut(id)?;
        habit.weight = match habit.effective_weight() {
            3 => 1,
            w => w as u8 + 1,
        };
        Ok(habit.weight)
    }

    pub fn set_weight(&mut self, id: &str, weight: u8) -> Result<(), ValidationError> {
        if !(1..=3).contains(&weight) {
            return Err(ValidationError::InvalidValue {
                field: "weight".into(),
                message: format!("{weight} is not one of 1, 2, 3"),
            });
        }
        self.get_mut(id)?.weight = weight;
        Ok(())
    }

    pub fn cycle_time_of_day(&mut self, id: &str) -> Result<TimeOfDay, ValidationError> {
        let habit = self.get_mut(id)?;
        habit.time_of_day = habit.time_of_day.next();
        Ok(habit.time_of_day)
    }

    /// Switch between daily and weekly, resetting target and unit.
    pub fn toggle_frequency(&mut self, id: &str) -> Result<FrequencyType, ValidationError> {
        let habit = self.get_mut(id)?;
        match habit.frequency_type {
            FrequencyType::Daily => {
                habit.frequency_type = FrequencyType::Weekly;
                habit.target_count = DEFAULT_WEEKLY_TARGET;
                habit.unit = Unit::Count;
            }
            FrequencyType::Weekly => {
                habit.frequency_type = FrequencyType::Daily;
                habit.target_count = 1;
                habit.unit = Unit::Check;
            }
        }
        Ok(habit.frequency_type)
    }

    pub fn increment_target(&mut self, id: &str) -> Result<u32, ValidationError> {
        let habit = self.get_mut(id)?;
        if habit.target_count < MAX_WEEKLY_TARGET {
            habit.target_count += 1;
        }
        Ok(habit.target_count)
    }

    pub fn decrement_target(&mut self, id: &str) -> Result<u32, ValidationError> {
        let habit = self.get_mut(id)?;
        if habit.target_count > 1 {
            habit.target_count -= 1;
        }
        Ok(habit.target_count)
    }

    /// Catalog templates not yet in the list whose title or description
    /// contains `search` (case-insensitive). An empty search matches all.
    pub fn available_from_catalog(&self, search: &str) -> Vec<&'static HabitTemplate> {
        let needle = search.to_lowercase();
        catalog::catalog()
            .iter()
            .filter(|t| !self.contains(&t.id))
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub(crate) fn replace_all(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
    }
}

impl<'a> IntoIterator for &'a HabitList {
    type Item = &'a Habit;
    type IntoIter = std::slice::Iter<'a, Habit>;

    fn into_iter(self) -> Self::IntoIter {
        self.habits.iter()
    }
}
