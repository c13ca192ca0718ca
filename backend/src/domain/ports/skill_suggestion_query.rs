//! Driving port for skill suggestions.

use async_trait::async_trait;

use crate::domain::{Error, SkillSuggestions};

/// Domain use-case port for suggesting skills from a description.
#[async_trait]
pub trait SkillSuggestionQuery: Send + Sync {
    /// Validate `skill_description` and return generated suggestions.
    async fn suggest(&self, skill_description: &str) -> Result<SkillSuggestions, Error>;
}
