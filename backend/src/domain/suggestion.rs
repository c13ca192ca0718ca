//! Skill suggestion requests and results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters in a trimmed skill description.
pub const SUGGESTION_MIN_CHARS: usize = 10;

/// Validation errors for skill descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuggestionValidationError {
    /// The trimmed description is shorter than [`SUGGESTION_MIN_CHARS`].
    #[error("skill description must have at least {min} characters, got {actual}")]
    TooShort {
        /// Required minimum.
        min: usize,
        /// Characters supplied after trimming.
        actual: usize,
    },
}

/// Free-text description of a user's skill, long enough to suggest from.
///
/// The raw text is kept as typed; only the length check trims it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDescription(String);

impl SkillDescription {
    /// Validate a raw description.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SkillDescription;
    ///
    /// assert!(SkillDescription::new("I can teach").is_ok());
    /// assert!(SkillDescription::new("short").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, SuggestionValidationError> {
        let raw = raw.into();
        let actual = raw.trim().chars().count();
        if actual < SUGGESTION_MIN_CHARS {
            return Err(SuggestionValidationError::TooShort {
                min: SUGGESTION_MIN_CHARS,
                actual,
            });
        }
        Ok(Self(raw))
    }

    /// The description as typed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the instruction prompt sent to the generator.
    pub fn render_prompt(&self) -> String {
        format!(
            "You are an expert in skill categorization and matching.\n\n\
             Based on the user's skill description, suggest relevant skills and identify \
             potential skill matches for each suggested skill.\n\n\
             Skill Description: {}\n\n\
             Format your response as a JSON object with two keys:\n\n\
             - suggestedSkills: An array of strings, where each string is a suggested skill.\n\
             - skillMatches: A record (object), where each key is a suggested skill, and the \
             value is an array of strings representing skill matches for that suggested skill.\n",
            self.0
        )
    }
}

/// Structured result returned by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestions {
    /// Skills related to the description.
    pub suggested_skills: Vec<String>,
    /// For each suggested skill, related skills that pair well with it.
    pub skill_matches: BTreeMap<String, Vec<String>>,
}
