//! Habit catalog: the read-only pool of habit templates.
//!
//! Users never score against templates directly. Onboarding and the habit
//! manager copy templates into the user's own [`Habit`](crate::habit::Habit)
//! list, which is then edited independently.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Life area a habit belongs to.
///
/// Serialized in snake_case. The long display labels used by older exports
/// are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "Corpo & Vitalidade")]
    Body,
    #[serde(alias = "Mente & Espírito")]
    Mind,
    /// Abstinence habits: logging one means the user stayed clean.
    #[serde(alias = "Disciplina & Controle", alias = "discipline")]
    Vices,
    #[serde(alias = "Conexões & Tribo")]
    Social,
    #[serde(alias = "Ambiente & Foco")]
    Environment,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Body,
        Category::Mind,
        Category::Vices,
        Category::Social,
        Category::Environment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Body => "Body & Vitality",
            Category::Mind => "Mind & Spirit",
            Category::Vices => "Discipline & Control",
            Category::Social => "Connections & Tribe",
            Category::Environment => "Environment & Focus",
        }
    }

    /// First word of the label, for chart axes.
    pub fn short_label(&self) -> &'static str {
        self.label().split(' ').next().unwrap_or_default()
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "body" => Ok(Category::Body),
            "mind" => Ok(Category::Mind),
            "vices" | "discipline" => Ok(Category::Vices),
            "social" => Ok(Category::Social),
            "environment" => Ok(Category::Environment),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyType {
    Daily,
    Weekly,
}

impl std::str::FromStr for FrequencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(FrequencyType::Daily),
            "weekly" => Ok(FrequencyType::Weekly),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// How a log entry for the habit is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Simple check (`"bool"`).
    #[default]
    Check,
    /// Weekly count toward a target (`"x"`).
    Count,
    /// Ceiling not to exceed (`"max_x"`); a logged entry is a bad event.
    MaxCount,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Check => "bool",
            Unit::Count => "x",
            Unit::MaxCount => "max_x",
        }
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        match s {
            "x" => Unit::Count,
            "max_x" => Unit::MaxCount,
            _ => Unit::Check,
        }
    }
}

impl Serialize for Unit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Unit::from).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Any,
}

impl TimeOfDay {
    pub fn next(&self) -> Self {
        match self {
            TimeOfDay::Morning => TimeOfDay::Afternoon,
            TimeOfDay::Afternoon => TimeOfDay::Evening,
            TimeOfDay::Evening => TimeOfDay::Any,
            TimeOfDay::Any => TimeOfDay::Morning,
        }
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "any" => Ok(TimeOfDay::Any),
            other => Err(format!("unknown time of day: {other}")),
        }
    }
}

/// Weight used whenever a stored weight is missing or outside 1..=3.
pub const DEFAULT_WEIGHT: u8 = 2;

pub(crate) fn default_weight() -> u8 {
    DEFAULT_WEIGHT
}

pub(crate) fn default_target() -> u32 {
    1
}

/// Any JSON value is accepted; non-numbers and out-of-range numbers become
/// [`DEFAULT_WEIGHT`].
pub(crate) fn lenient_weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?.as_f64();
    Ok(match raw {
        Some(w) if w.is_finite() && (1.0..=3.0).contains(&w) => w.round() as u8,
        _ => DEFAULT_WEIGHT,
    })
}

pub(crate) fn lenient_target<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?.as_f64();
    Ok(match raw {
        Some(t) if t.is_finite() && t >= 0.0 => t.round().min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

/// Immutable habit definition from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitTemplate {
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
}

struct Entry {
    id: &'static str,
    title: &'static str,
    category: Category,
    frequency: FrequencyType,
    target: u32,
    unit: Unit,
    weight: u8,
    time: TimeOfDay,
    description: &'static str,
    tip: Option<&'static str>,
}

impl Entry {
    fn to_template(&self) -> HabitTemplate {
        HabitTemplate {
            id: self.id.to_string(),
            title: self.title.to_string(),
            category: self.category,
            frequency_type: self.frequency,
            target_count: self.target,
            unit: self.unit,
            weight: self.weight,
            time_of_day: self.time,
            description: Some(self.description.to_string()),
            science_tip: self.tip.map(str::to_string),
        }
    }
}

use Category::*;
use FrequencyType::{Daily, Weekly};
use TimeOfDay::{Afternoon, Evening, Morning};

const ENTRIES: &[Entry] = &[
    // Body
    Entry { id: "sleep_7h", title: "Restorative Sleep", category: Body, frequency: Daily, target: 1, unit: Unit::Check, weight: 3, time: Morning, description: "Sleep 7-9h with good quality", tip: Some("Deep sleep clears metabolic waste from the brain and consolidates memory.") },
    Entry { id: "hydration", title: "Morning Hydration", category: Body, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: Morning, description: "500ml of water after waking up", tip: Some("Rehydrates tissue and restarts metabolism after the overnight fast.") },
    Entry { id: "sunlight", title: "Natural Light", category: Body, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: Morning, description: "10 min of morning sun", tip: Some("Regulates cortisol and sets the circadian clock for the night.") },
    Entry { id: "cold_shower", title: "Cold Shower", category: Body, frequency: Weekly, target: 5, unit: Unit::Count, weight: 1, time: Morning, description: "2 min of cold water at the end", tip: Some("Raises dopamine and builds stress resilience.") },
    Entry { id: "exercise_light", title: "Light Movement", category: Body, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: Afternoon, description: "Walk or stretch (20min)", tip: Some("Walking lowers amygdala activity.") },
    Entry { id: "exercise_heavy", title: "Intense Training", category: Body, frequency: Weekly, target: 5, unit: Unit::Count, weight: 3, time: Afternoon, description: "Strength or cardio (45min)", tip: Some("Crucial for mitochondrial health and longevity.") },
    Entry { id: "diet_clean", title: "Clean Nutrition", category: Body, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: Afternoon, description: "No ultra-processed food or sugar", tip: None },
    Entry { id: "supplements", title: "Supplements", category: Body, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: Morning, description: "Creatine and omega 3", tip: None },
    // Mind
    Entry { id: "meditation", title: "Meditation", category: Mind, frequency: Weekly, target: 5, unit: Unit::Count, weight: 1, time: Afternoon, description: "10 min of silence or mindfulness", tip: Some("Increases grey matter in the prefrontal cortex.") },
    Entry { id: "gratitude", title: "Appreciate Life", category: Mind, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: Evening, description: "Reflect on the good parts of the day", tip: Some("Trains the brain to spot opportunities.") },
    Entry { id: "no_screens_bed", title: "Sleep Hygiene", category: Mind, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: Evening, description: "No screens 1h before bed", tip: Some("Blue light suppresses melatonin and hurts deep sleep.") },
    Entry { id: "reading", title: "Reading", category: Mind, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: Evening, description: "Read 10 pages", tip: None },
    // Social
    Entry { id: "partner_connection", title: "Intentional Connection", category: Social, frequency: Daily, target: 1, unit: Unit::Check, weight: 3, time: Evening, description: "Quality time with your partner", tip: None },
    Entry { id: "friend_meet", title: "Meet in Person", category: Social, frequency: Weekly, target: 2, unit: Unit::Count, weight: 3, time: TimeOfDay::Any, description: "See friends in person", tip: None },
    Entry { id: "friend_call", title: "Remote Contact", category: Social, frequency: Weekly, target: 1, unit: Unit::Count, weight: 1, time: TimeOfDay::Any, description: "Call or text someone", tip: None },
    Entry { id: "family_time", title: "Family Time", category: Social, frequency: Weekly, target: 3, unit: Unit::Count, weight: 2, time: TimeOfDay::Any, description: "Call or visit relatives", tip: None },
    Entry { id: "social_event", title: "Social Life", category: Social, frequency: Weekly, target: 1, unit: Unit::Count, weight: 3, time: TimeOfDay::Any, description: "Go out / attend a social event", tip: None },
    Entry { id: "kindness", title: "Kindness", category: Social, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: TimeOfDay::Any, description: "Be kind in your interactions", tip: Some("Altruism releases oxytocin and lowers stress.") },
    // Vices / discipline
    Entry { id: "no_nicotine", title: "Zero Nicotine", category: Vices, frequency: Daily, target: 1, unit: Unit::Check, weight: 3, time: TimeOfDay::Any, description: "Stay free of the addiction", tip: None },
    Entry { id: "avoid_alcohol", title: "Zero Alcohol", category: Vices, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: TimeOfDay::Any, description: "Mark if you did NOT drink today", tip: None },
    Entry { id: "avoid_cannabis", title: "Zero Cannabis", category: Vices, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: TimeOfDay::Any, description: "Mark if you did NOT use today", tip: None },
    Entry { id: "avoid_games", title: "Zero Games", category: Vices, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: TimeOfDay::Any, description: "Mark if you did NOT play today", tip: None },
    Entry { id: "avoid_shorts", title: "Zero Reels/TikTok", category: Vices, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: TimeOfDay::Any, description: "Mark if you did NOT watch today", tip: None },
    Entry { id: "avoid_yt", title: "Zero YouTube", category: Vices, frequency: Daily, target: 1, unit: Unit::Check, weight: 2, time: TimeOfDay::Any, description: "Mark if you did NOT watch today", tip: None },
    Entry { id: "limit_alcohol", title: "Alcohol Limit", category: Vices, frequency: Weekly, target: 2, unit: Unit::MaxCount, weight: 2, time: TimeOfDay::Any, description: "Mark each day you drank; stay at or under the limit", tip: None },
    Entry { id: "limit_shorts", title: "Short Video Limit", category: Vices, frequency: Daily, target: 1, unit: Unit::MaxCount, weight: 3, time: TimeOfDay::Any, description: "Mark if you scrolled short videos today", tip: None },
    // Environment
    Entry { id: "environment", title: "Environment", category: Environment, frequency: Daily, target: 1, unit: Unit::Check, weight: 1, time: Morning, description: "Tidy your physical space", tip: None },
];

/// All catalog templates, in catalog order.
pub fn catalog() -> &'static [HabitTemplate] {
    static CATALOG: OnceLock<Vec<HabitTemplate>> = OnceLock::new();
    CATALOG.get_or_init(|| ENTRIES.iter().map(Entry::to_template).collect())
}

pub fn template(id: &str) -> Option<&'static HabitTemplate> {
    catalog().iter().find(|t| t.id == id)
}
