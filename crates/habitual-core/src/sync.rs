//! Keeping user habits in step with the catalog.
//!
//! Catalog texts get revised over time. Users hold copies, so a refresh has
//! to overwrite the template fields while leaving personal state alone.

use serde::{Deserialize, Serialize};

use crate::catalog::{template, HabitTemplate};
use crate::error::ValidationError;
use crate::habit::{Habit, HabitList};

/// A user habit whose texts no longer match its catalog template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedHabit {
    pub id: String,
    /// Differing fields, by their wire names.
    pub fields: Vec<String>,
}

/// Partial text edit for one habit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub science_tip: Option<String>,
}

/// Catalog version of `habit` with `enabled`, `streak` and `why_chosen` kept.
fn refreshed(habit: &Habit, tpl: &HabitTemplate) -> Habit {
    Habit {
        enabled: habit.enabled,
        streak: habit.streak,
        why_chosen: habit.why_chosen.clone(),
        ..Habit::from_template(tpl)
    }
}

/// Replace template fields of every catalog-backed habit. Custom or retired
/// ids are left as they are. Returns the ids that changed.
pub fn sync_with_catalog(habits: &mut HabitList) -> Vec<String> {
    let mut changed = Vec::new();
    let synced: Vec<Habit> = habits
        .iter()
        .map(|habit| match template(&habit.id) {
            Some(tpl) => {
                let fresh = refreshed(habit, tpl);
                if &fresh != habit {
                    changed.push(habit.id.clone());
                }
                fresh
            }
            None => habit.clone(),
        })
        .collect();

    habits.replace_all(synced);
    tracing::debug!(changed = changed.len(), "synced habits with catalog");
    changed
}

/// Habits whose title, description or science tip differ from the catalog.
pub fn outdated(habits: &[Habit]) -> Vec<OutdatedHabit> {
    habits
        .iter()
        .filter_map(|habit| {
            let tpl = template(&habit.id)?;
            let mut fields = Vec::new();
            if habit.title != tpl.title {
                fields.push("title".to_string());
            }
            if habit.description != tpl.description {
                fields.push("description".to_string());
            }
            if habit.science_tip != tpl.science_tip {
                fields.push("scienceTip".to_string());
            }
            (!fields.is_empty()).then(|| OutdatedHabit {
                id: habit.id.clone(),
                fields,
            })
        })
        .collect()
}

/// Overwrite selected text fields of one habit.
pub fn update_texts(habits: &mut HabitList, id: &str, update: TextUpdate) -> Result<(), ValidationError> {
    let habit = habits.get_mut(id)?;
    if let Some(title) = update.title {
        if title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "title must not be empty".into(),
            });
        }
        habit.title = title;
    }
    if let Some(description) = update.description {
        habit.description = Some(description);
    }
    if let Some(tip) = update.science_tip {
        habit.science_tip = Some(tip);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stale_list() -> HabitList {
        let mut list = HabitList::new();
        list.add_from_catalog("meditation").unwrap();
        list.add_from_catalog("sleep_7h").unwrap();
        update_texts(
            &mut list,
            "meditation",
            TextUpdate {
                title: Some("Old title".into()),
                science_tip: Some("old tip".into()),
                ..Default::default()
            },
        )
        .unwrap();
        list.set_enabled("meditation", false).unwrap();
        list.set_weight("meditation", 3).unwrap();
        list
    }

    #[test]
    fn outdated_reports_differing_fields() {
        let list = stale_list();
        let report = outdated(list.as_slice());
        assert_eq!(
            report,
            vec![OutdatedHabit {
                id: "meditation".into(),
                fields: vec!["title".into(), "scienceTip".into()],
            }]
        );
    }

    #[test]
    fn sync_restores_texts_and_keeps_personal_state() {
        let mut list = stale_list();
        let mut custom = list.get("meditation").unwrap().clone();
        custom.id = "custom_x".into();
        custom.title = "My own".into();
        list.push(custom).unwrap();
        {
            let h = list.get_mut("meditation").unwrap();
            h.streak = 12;
            h.why_chosen = Some("stress".into());
        }

        let changed = sync_with_catalog(&mut list);
        assert_eq!(changed, vec!["meditation".to_string()]);

        let med = list.get("meditation").unwrap();
        assert_eq!(med.title, "Meditation");
        // Weight is a template field and resets.
        assert_eq!(med.weight, 1);
        assert!(!med.enabled);
        assert_eq!(med.streak, 12);
        assert_eq!(med.why_chosen.as_deref(), Some("stress"));
        assert_eq!(list.get("custom_x").unwrap().title, "My own");
        assert!(outdated(list.as_slice()).is_empty());
    }

    #[test]
    fn update_texts_validates() {
        let mut list = stale_list();
        assert!(matches!(
            update_texts(&mut list, "nope", TextUpdate::default()),
            Err(ValidationError::UnknownHabit(_))
        ));
        assert!(update_texts(
            &mut list,
            "sleep_7h",
            TextUpdate {
                title: Some("  ".into()),
                ..Default::default()
            }
        )
        .is_err());
    }
}
