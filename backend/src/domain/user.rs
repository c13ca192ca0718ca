//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::SkillList;

/// Highest aggregate rating a user can hold.
pub const RATING_MAX: f64 = 5.0;

/// Validation errors returned when building users and their fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The aggregate rating was outside `0.0..=5.0` or not finite.
    #[error("rating must be between 0.0 and 5.0")]
    RatingOutOfRange,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Aggregate star rating in `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Validate and construct a rating.
    pub fn new(value: f64) -> Result<Self, UserValidationError> {
        if !value.is_finite() || !(0.0..=RATING_MAX).contains(&value) {
            return Err(UserValidationError::RatingOutOfRange);
        }
        Ok(Self(value))
    }

    /// Raw rating value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Rating> for f64 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = UserValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Free-text location.
    pub location: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Skills the user can teach.
    pub skills_offered: SkillList,
    /// Skills the user wants to learn.
    pub skills_wanted: SkillList,
    /// Free-text availability.
    pub availability: String,
    /// Aggregate rating, expected in `0.0..=5.0`.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub reviews: u32,
}

/// Directory user profile.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `rating` is finite and within `0.0..=5.0`.
///
/// The rating is an imported aggregate; it is not recomputed from reviews.
/// Use [`super::RatingSummary`] to compare it with a review set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    location: String,
    avatar_url: String,
    skills_offered: SkillList,
    skills_wanted: SkillList,
    availability: String,
    rating: Rating,
    reviews: u32,
}

impl User {
    /// Build a user from a draft, validating the rating.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            name,
            email,
            location,
            avatar_url,
            skills_offered,
            skills_wanted,
            availability,
            rating,
            reviews,
        } = draft;

        Ok(Self {
            id,
            name,
            email,
            location,
            avatar_url,
            skills_offered,
            skills_wanted,
            availability,
            rating: Rating::new(rating)?,
            reviews,
        })
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Free-text location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Avatar image URL.
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Skills the user can teach.
    pub fn skills_offered(&self) -> &SkillList {
        &self.skills_offered
    }

    /// Skills the user wants to learn.
    pub fn skills_wanted(&self) -> &SkillList {
        &self.skills_wanted
    }

    /// Free-text availability.
    pub fn availability(&self) -> &str {
        &self.availability
    }

    /// Aggregate rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Number of reviews behind the rating.
    pub fn reviews(&self) -> u32 {
        self.reviews
    }

    pub(crate) fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    pub(crate) fn with_location(mut self, location: String) -> Self {
        self.location = location;
        self
    }

    pub(crate) fn with_avatar_url(mut self, avatar_url: String) -> Self {
        self.avatar_url = avatar_url;
        self
    }

    pub(crate) fn with_availability(mut self, availability: String) -> Self {
        self.availability = availability;
        self
    }

    pub(crate) fn with_skills_offered(mut self, skills: SkillList) -> Self {
        self.skills_offered = skills;
        self
    }

    pub(crate) fn with_skills_wanted(mut self, skills: SkillList) -> Self {
        self.skills_wanted = skills;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    location: String,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    skills_offered: Vec<String>,
    #[serde(default)]
    skills_wanted: Vec<String>,
    #[serde(default)]
    availability: String,
    rating: f64,
    reviews: u32,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            location: value.location,
            avatar_url: value.avatar_url,
            skills_offered: value.skills_offered.as_slice().to_vec(),
            skills_wanted: value.skills_wanted.as_slice().to_vec(),
            availability: value.availability,
            rating: value.rating.value(),
            reviews: value.reviews,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::new(UserDraft {
            id: UserId::new(value.id)?,
            name: value.name,
            email: value.email,
            location: value.location,
            avatar_url: value.avatar_url,
            skills_offered: SkillList::new(value.skills_offered),
            skills_wanted: SkillList::new(value.skills_wanted),
            availability: value.availability,
            rating: value.rating,
            reviews: value.reviews,
        })
    }
}
