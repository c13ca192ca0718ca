//! Profile editing for the current user.
//!
//! Edits are pure: [`update_field`] returns a new [`User`] and [`commit`]
//! validates the result before it is persisted.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::{RatingSummary, Review, SkillList, User};

/// Editable profile fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    /// Display name.
    Name,
    /// Free-text location.
    Location,
    /// Free-text availability.
    Availability,
    /// Avatar image URL.
    AvatarUrl,
    /// Comma-separated skills offered.
    SkillsOffered,
    /// Comma-separated skills wanted.
    SkillsWanted,
}

impl ProfileField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Availability => "availability",
            Self::AvatarUrl => "avatarUrl",
            Self::SkillsOffered => "skillsOffered",
            Self::SkillsWanted => "skillsWanted",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ProfileValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "location" => Ok(Self::Location),
            "availability" => Ok(Self::Availability),
            "avatarUrl" => Ok(Self::AvatarUrl),
            "skillsOffered" => Ok(Self::SkillsOffered),
            "skillsWanted" => Ok(Self::SkillsWanted),
            other => Err(ProfileValidationError::UnknownField(other.to_owned())),
        }
    }
}

/// Errors raised while editing or committing a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileValidationError {
    /// The field is not editable or does not exist.
    #[error("unknown profile field: {0}")]
    UnknownField(String),
    /// The name is blank after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// The email is not of the form `local@domain.tld`.
    #[error("email address is not valid")]
    InvalidEmail,
}

impl ProfileValidationError {
    /// Field the error refers to, for structured error details.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField(name) => name,
            Self::EmptyName => "name",
            Self::InvalidEmail => "email",
        }
    }
}

/// Apply one raw form value to `user`.
///
/// Text fields take the raw value verbatim. Skill fields are split on commas,
/// trimmed and stripped of empty segments; order and duplicates are kept.
///
/// # Examples
/// ```
/// use backend::domain::{update_field, ProfileField, SkillList, User, UserDraft, UserId};
///
/// let user = User::new(UserDraft {
///     id: UserId::random(),
///     name: "Ada".into(),
///     email: "ada@example.com".into(),
///     location: "London".into(),
///     avatar_url: String::new(),
///     skills_offered: SkillList::default(),
///     skills_wanted: SkillList::default(),
///     availability: String::new(),
///     rating: 0.0,
///     reviews: 0,
/// })
/// .expect("valid user");
///
/// let edited = update_field(&user, ProfileField::SkillsOffered, "a, b ,, c");
/// assert_eq!(edited.skills_offered().as_slice(), ["a", "b", "c"]);
/// ```
pub fn update_field(user: &User, field: ProfileField, raw_value: &str) -> User {
    let user = user.clone();
    match field {
        ProfileField::Name => user.with_name(raw_value.to_owned()),
        ProfileField::Location => user.with_location(raw_value.to_owned()),
        ProfileField::Availability => user.with_availability(raw_value.to_owned()),
        ProfileField::AvatarUrl => user.with_avatar_url(raw_value.to_owned()),
        ProfileField::SkillsOffered => {
            user.with_skills_offered(SkillList::parse_comma_separated(raw_value))
        }
        ProfileField::SkillsWanted => {
            user.with_skills_wanted(SkillList::parse_comma_separated(raw_value))
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validate an edited profile before it is saved.
///
/// Rating bounds are already guaranteed by [`User`] construction.
pub fn commit(user: User) -> Result<User, ProfileValidationError> {
    if user.name().trim().is_empty() {
        return Err(ProfileValidationError::EmptyName);
    }
    if !email_regex().is_match(user.email()) {
        return Err(ProfileValidationError::InvalidEmail);
    }
    Ok(user)
}

/// The current user's profile page: their record and the reviews about them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Profile owner.
    pub user: User,
    /// Reviews targeting the owner.
    pub reviews: Vec<Review>,
    /// Summary computed from `reviews`.
    pub rating_summary: RatingSummary,
}

impl ProfileView {
    /// Assemble a view, summarising the reviews.
    pub fn new(user: User, reviews: Vec<Review>) -> Self {
        let rating_summary = RatingSummary::from_reviews(&reviews);
        Self {
            user,
            reviews,
            rating_summary,
        }
    }
}
