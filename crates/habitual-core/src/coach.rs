//! Coaching prompt builder.
//!
//! The text is handed to a generative model by the caller; talking to the
//! model is not this crate's concern.

use chrono::NaiveDate;
use indoc::formatdoc;

use crate::date::format_date;
use crate::error::Result;
use crate::habit::Habit;
use crate::log::DailyLog;
use crate::onboarding::UserProfile;

/// Log days included in the prompt.
pub const RECENT_DAYS: usize = 7;

/// Shown when the model could not be reached or returned nothing.
pub const FALLBACK_MESSAGE: &str =
    "Your virtual coach could not be reached. Check your connection or try again later.";

/// Shown when the model answered with empty text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "No advice could be generated right now.";

fn language_name(locale: &str) -> &str {
    match locale.split(['-', '_']).next().unwrap_or_default() {
        "pt" => "Brazilian Portuguese",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        _ => "English",
    }
}

/// Build the prompt for `profile` as of `today`.
///
/// `locale` picks the answer language (`en`, `pt-BR`, ...).
pub fn coaching_prompt(
    profile: &UserProfile,
    habits: &[Habit],
    log: &DailyLog,
    today: NaiveDate,
    locale: &str,
) -> Result<String> {
    let goals = habits
        .iter()
        .filter(|h| h.enabled)
        .map(|h| h.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let recent: Vec<(String, _)> = log
        .recent_days(RECENT_DAYS)
        .into_iter()
        .map(|(date, entry)| (format_date(date), entry))
        .collect();
    let recent = serde_json::to_string(&recent)?;

    Ok(formatdoc! {"
        You are a well-being and happiness coach for a habit-tracking app.

        User profile: {name}
        Goals: {goals}

        Data from the last {RECENT_DAYS} days:
        {recent}

        Today is: {today}

        Instructions:
        1. Analyze the user's progress in an empathetic, motivating way.
        2. Identify patterns (e.g. missed sleep but did well on exercise).
        3. Give 3 short, practical, science-based tips to improve next week.
        4. Keep the tone friendly and encouraging, and use emojis.
        5. Answer in {language}.
        6. Be concise (150 words maximum).
        ",
        name = profile.name,
        today = format_date(today),
        language = language_name(locale),
    })
}

/// Pick what to show the user from the collaborator's outcome.
pub fn advice_or_fallback<E: std::fmt::Display>(response: std::result::Result<String, E>) -> String {
    match response {
        Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "coach request failed");
            FALLBACK_MESSAGE.to_string()
        }
    }
}
