//! Survey-driven starter protocol.
//!
//! A new user answers a short lifestyle survey; [`generate_protocol`] turns
//! the answers into a personalized habit list, each habit carrying the reason
//! it was picked.

use serde::{Deserialize, Serialize};

use crate::catalog::template;
use crate::error::ValidationError;
use crate::habit::{Habit, HabitList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Moderate,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DietQuality {
    Poor,
    #[default]
    Average,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    Single,
    #[default]
    Dating,
    Married,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SocialBattery {
    Introvert,
    Extrovert,
    #[default]
    Ambivert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlcoholFrequency {
    Never,
    #[default]
    Socially,
    Often,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Energy,
    Peace,
    Connection,
    Discipline,
}

/// Onboarding survey. Scales are 1-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyAnswers {
    pub sleep_quality: u8,
    pub stress_level: u8,
    pub activity_level: ActivityLevel,
    pub diet_quality: DietQuality,
    pub relationship_status: RelationshipStatus,
    pub social_battery: SocialBattery,
    pub smokes: bool,
    pub alcohol_freq: AlcoholFrequency,
    pub cannabis_user: bool,
    pub screen_time_issue: bool,
    pub primary_goals: Vec<Goal>,
}

impl Default for SurveyAnswers {
    fn default() -> Self {
        Self {
            sleep_quality: 5,
            stress_level: 5,
            activity_level: ActivityLevel::default(),
            diet_quality: DietQuality::default(),
            relationship_status: RelationshipStatus::default(),
            social_battery: SocialBattery::default(),
            smokes: false,
            alcohol_freq: AlcoholFrequency::default(),
            cannabis_user: false,
            screen_time_issue: true,
            primary_goals: vec![Goal::Energy],
        }
    }
}

impl SurveyAnswers {
    pub fn has_goal(&self, goal: Goal) -> bool {
        self.primary_goals.contains(&goal)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("sleepQuality", self.sleep_quality), ("stressLevel", self.stress_level)] {
            if !(1..=10).contains(&value) {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: format!("{value} is outside 1-10"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub survey_answers: SurveyAnswers,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub experience: u32,
}

fn default_level() -> u32 {
    1
}

impl UserProfile {
    /// Fresh profile for a user who just finished the survey.
    pub fn new(name: impl Into<String>, answers: SurveyAnswers) -> Self {
        Self {
            name: name.into(),
            onboarding_completed: true,
            survey_answers: answers,
            level: default_level(),
            experience: 0,
        }
    }
}

struct ProtocolBuilder {
    habits: Vec<Habit>,
}

impl ProtocolBuilder {
    /// Instantiate `id` with `weight` and `why`. Unknown or repeated ids are
    /// skipped.
    fn add(&mut self, id: &str, weight: Option<u8>, why: &str) {
        if self.habits.iter().any(|h| h.id == id) {
            return;
        }
        let Some(tpl) = template(id) else {
            tracing::warn!(id, "onboarding rule references a habit missing from the catalog");
            return;
        };
        let mut habit = Habit::from_template(tpl);
        if let Some(w) = weight {
            habit.weight = w;
        }
        habit.why_chosen = Some(why.to_string());
        self.habits.push(habit);
    }
}

/// Build the starter habit list for `answers`.
pub fn generate_protocol(answers: &SurveyAnswers) -> Vec<Habit> {
    let mut p = ProtocolBuilder { habits: Vec::new() };

    p.add("sleep_7h", Some(3), "Foundational for any goal.");
    p.add("hydration", None, "Biological base for energy.");
    p.add("environment", None, "A small daily win for discipline.");
    p.add("sunlight", None, "Hormonal regulation.");

    if answers.activity_level == ActivityLevel::Sedentary {
        p.add("exercise_light", Some(2), "Start slow to build consistency.");
    } else {
        p.add("exercise_heavy", Some(3), "Keep up your physical performance.");
    }

    if answers.has_goal(Goal::Peace) || answers.stress_level > 6 {
        p.add("meditation", Some(1), "Actively lowers cortisol.");
        p.add("gratitude", Some(1), "Reorients the mind toward the positive.");
    }

    if answers.has_goal(Goal::Connection) || answers.relationship_status != RelationshipStatus::Single {
        p.add("partner_connection", Some(3), "Strengthens close bonds.");
        p.add("kindness", Some(1), "Builds social well-being.");
    }

    if answers.has_goal(Goal::Energy) {
        p.add("cold_shower", Some(1), "Natural adrenaline boost.");
        p.add("diet_clean", Some(2), "Stable fuel.");
    }

    if answers.sleep_quality < 7 {
        p.add("no_screens_bed", Some(2), "Improves sleep hygiene.");
    }
    if answers.smokes {
        p.add("no_nicotine", Some(3), "Removes a drag on your health.");
    }
    if answers.alcohol_freq == AlcoholFrequency::Often {
        p.add("limit_alcohol", Some(2), "Moderation for health.");
    }
    if answers.screen_time_issue {
        p.add("limit_shorts", Some(3), "Recover your dopamine baseline.");
    }

    p.habits
}

/// Validate the survey and produce the profile plus its protocol.
pub fn complete_onboarding(
    name: &str,
    answers: SurveyAnswers,
) -> Result<(UserProfile, HabitList), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    answers.validate()?;

    let habits = HabitList::from_vec(generate_protocol(&answers))?;
    tracing::debug!(habits = habits.len(), "generated onboarding protocol");
    Ok((UserProfile::new(name, answers), habits))
}
