//! Skill suggestion domain service.
//!
//! Validates the description locally and only then calls the external
//! generator. Provider failures are logged in full and reported to callers
//! with a generic message.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{SkillSuggestionQuery, SkillSuggestionSource};
use crate::domain::{Error, SkillDescription, SkillSuggestions, SuggestionValidationError};

/// Message returned when the description is too short.
pub const DESCRIPTION_TOO_SHORT_MESSAGE: &str =
    "Please provide a more detailed description of your skill (at least 10 characters).";

/// Message returned when the generator fails.
pub const SUGGESTION_UNAVAILABLE_MESSAGE: &str =
    "An unexpected error occurred. Please try again later.";

/// Service implementing [`SkillSuggestionQuery`] over a suggestion source.
pub struct SkillSuggestionService<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for SkillSuggestionService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ?Sized> SkillSuggestionService<S> {
    /// Create a service over `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_validation_error(error: SuggestionValidationError) -> Error {
    match error {
        SuggestionValidationError::TooShort { min, actual } => {
            Error::invalid_request(DESCRIPTION_TOO_SHORT_MESSAGE).with_details(json!({
                "field": "skillDescription",
                "code": "description_too_short",
                "minChars": min,
                "actualChars": actual,
            }))
        }
    }
}

#[async_trait]
impl<S> SkillSuggestionQuery for SkillSuggestionService<S>
where
    S: SkillSuggestionSource + ?Sized,
{
    async fn suggest(&self, skill_description: &str) -> Result<SkillSuggestions, Error> {
        let description = SkillDescription::new(skill_description).map_err(map_validation_error)?;
        match self.source.generate(&description).await {
            Ok(suggestions) => {
                info!(
                    suggested = suggestions.suggested_skills.len(),
                    "skill suggestions generated"
                );
                Ok(suggestions)
            }
            Err(source_error) => {
                error!(error = %source_error, "skill suggestion generation failed");
                Err(Error::upstream(SUGGESTION_UNAVAILABLE_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockSkillSuggestionSource, SkillSuggestionSourceError};
    use rstest::rstest;

    fn make_service(
        source: MockSkillSuggestionSource,
    ) -> SkillSuggestionService<MockSkillSuggestionSource> {
        SkillSuggestionService::new(Arc::new(source))
    }

    #[rstest]
    #[case("short")]
    #[case("   ")]
    #[case("  123456789  ")]
    #[tokio::test]
    async fn short_descriptions_never_reach_the_source(#[case] raw: &str) {
        let mut source = MockSkillSuggestionSource::new();
        source.expect_generate().never();

        let error = make_service(source)
            .suggest(raw)
            .await
            .expect_err("too short");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), DESCRIPTION_TOO_SHORT_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn valid_descriptions_call_the_source_once() {
        let mut source = MockSkillSuggestionSource::new();
        source
            .expect_generate()
            .withf(|description: &SkillDescription| description.as_str() == "I can teach")
            .times(1)
            .return_once(|_| {
                Ok(SkillSuggestions {
                    suggested_skills: vec!["Tutoring".to_owned()],
                    skill_matches: [("Tutoring".to_owned(), vec!["Mentoring".to_owned()])]
                        .into_iter()
                        .collect(),
                })
            });

        let suggestions = make_service(source)
            .suggest("I can teach")
            .await
            .expect("suggestions");
        assert_eq!(suggestions.suggested_skills, ["Tutoring"]);
    }

    #[rstest]
    #[case(SkillSuggestionSourceError::timeout("deadline elapsed"))]
    #[case(SkillSuggestionSourceError::decode("missing skillMatches"))]
    #[case(SkillSuggestionSourceError::empty())]
    #[case(SkillSuggestionSourceError::unconfigured())]
    #[tokio::test]
    async fn source_failures_become_generic_upstream_errors(
        #[case] failure: SkillSuggestionSourceError,
    ) {
        let mut source = MockSkillSuggestionSource::new();
        source.expect_generate().return_once(move |_| Err(failure));

        let error = make_service(source)
            .suggest("I teach conversational Tamil")
            .await
            .expect_err("source failed");

        assert_eq!(error.code(), ErrorCode::UpstreamUnavailable);
        assert_eq!(error.message(), SUGGESTION_UNAVAILABLE_MESSAGE);
        assert!(error.details().is_none(), "provider detail must not leak");
    }
}
