//! Driven port for the external skill suggestion generator.

use async_trait::async_trait;

use crate::domain::{SkillDescription, SkillSuggestions};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the suggestion generator.
    pub enum SkillSuggestionSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } => "suggestion transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } => "suggestion request timed out: {message}",
        /// The provider rate-limited the request.
        RateLimited { message: String } => "suggestion provider rate limited request: {message}",
        /// The provider rejected the request.
        InvalidRequest { message: String } => "suggestion request rejected: {message}",
        /// The response did not match the expected shape.
        Decode { message: String } => "suggestion response decode failed: {message}",
        /// The provider returned no output.
        Empty => "suggestion provider returned no output",
        /// No provider credentials are configured.
        Unconfigured => "suggestion provider is not configured",
    }
}

/// Port for generating skill suggestions from a description.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillSuggestionSource: Send + Sync {
    /// Generate suggestions for one description.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use backend::domain::SkillDescription;
    /// use backend::domain::ports::{FixtureSkillSuggestionSource, SkillSuggestionSource};
    ///
    /// let description = SkillDescription::new("I teach beginner guitar")?;
    /// let suggestions = FixtureSkillSuggestionSource.generate(&description).await?;
    /// assert!(!suggestions.suggested_skills.is_empty());
    /// ```
    async fn generate(
        &self,
        description: &SkillDescription,
    ) -> Result<SkillSuggestions, SkillSuggestionSourceError>;
}

/// Fixture source returning a fixed suggestion set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSkillSuggestionSource;

#[async_trait]
impl SkillSuggestionSource for FixtureSkillSuggestionSource {
    async fn generate(
        &self,
        _description: &SkillDescription,
    ) -> Result<SkillSuggestions, SkillSuggestionSourceError> {
        Ok(SkillSuggestions {
            suggested_skills: vec!["Music Theory".to_owned()],
            skill_matches: [(
                "Music Theory".to_owned(),
                vec!["Guitar".to_owned(), "Composition".to_owned()],
            )]
            .into_iter()
            .collect(),
        })
    }
}

/// Source used when no provider is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSkillSuggestionSource;

#[async_trait]
impl SkillSuggestionSource for UnconfiguredSkillSuggestionSource {
    async fn generate(
        &self,
        _description: &SkillDescription,
    ) -> Result<SkillSuggestions, SkillSuggestionSourceError> {
        Err(SkillSuggestionSourceError::unconfigured())
    }
}
