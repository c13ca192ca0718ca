//! Reviews left by one user about another.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{UserId, UserValidationError};

/// Validation errors raised when constructing reviews.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewValidationError {
    /// Identifier text was not a UUID.
    #[error("review id must be a valid UUID")]
    InvalidId,
    /// Star rating outside `1..=5`.
    #[error("review rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    /// A user reviewed themselves.
    #[error("users cannot review themselves")]
    SelfReview,
    /// A referenced user id was invalid.
    #[error(transparent)]
    User(#[from] UserValidationError),
}

/// Stable review identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Parse a review identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ReviewValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ReviewValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ReviewId> for String {
    fn from(value: ReviewId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ReviewId {
    type Error = ReviewValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Whole-star review rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ReviewRating(u8);

impl ReviewRating {
    /// Validate and construct a rating.
    pub fn new(stars: u8) -> Result<Self, ReviewValidationError> {
        if (1..=5).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ReviewValidationError::RatingOutOfRange(stars))
        }
    }

    /// Number of stars.
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl From<ReviewRating> for u8 {
    fn from(value: ReviewRating) -> Self {
        value.0
    }
}

impl TryFrom<u8> for ReviewRating {
    type Error = ReviewValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Input payload for [`Review::new`].
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    /// Stable identifier.
    pub id: ReviewId,
    /// User who wrote the review.
    pub author_id: UserId,
    /// User being reviewed.
    pub target_user_id: UserId,
    /// Star rating.
    pub rating: ReviewRating,
    /// Free-text comment.
    pub comment: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// An immutable review of one user by another.
///
/// ## Invariants
/// - `author_id != target_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReviewDto", into = "ReviewDto")]
pub struct Review {
    id: ReviewId,
    author_id: UserId,
    target_user_id: UserId,
    rating: ReviewRating,
    comment: String,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Build a review, rejecting self-reviews.
    pub fn new(draft: ReviewDraft) -> Result<Self, ReviewValidationError> {
        if draft.author_id == draft.target_user_id {
            return Err(ReviewValidationError::SelfReview);
        }
        Ok(Self {
            id: draft.id,
            author_id: draft.author_id,
            target_user_id: draft.target_user_id,
            rating: draft.rating,
            comment: draft.comment,
            created_at: draft.created_at,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> ReviewId {
        self.id
    }

    /// User who wrote the review.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// User being reviewed.
    pub fn target_user_id(&self) -> &UserId {
        &self.target_user_id
    }

    /// Star rating.
    pub fn rating(&self) -> ReviewRating {
        self.rating
    }

    /// Free-text comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Average and count of a set of reviews.
///
/// # Examples
/// ```
/// use backend::domain::RatingSummary;
///
/// let summary = RatingSummary::from_reviews(&[]);
/// assert_eq!(summary.count, 0);
/// assert!(summary.average.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean star rating, absent when there are no reviews.
    pub average: Option<f64>,
    /// Number of reviews counted.
    pub count: u32,
}

impl RatingSummary {
    /// Summarise `reviews`.
    #[expect(
        clippy::float_arithmetic,
        reason = "average star rating is a fractional display value"
    )]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let count = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
        if count == 0 {
            return Self::default();
        }
        let total: u32 = reviews.iter().map(|r| u32::from(r.rating.stars())).sum();
        Self {
            average: Some(f64::from(total) / f64::from(count)),
            count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDto {
    id: String,
    author_id: String,
    target_user_id: String,
    rating: u8,
    #[serde(default)]
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        Self {
            id: value.id.to_string(),
            author_id: value.author_id.to_string(),
            target_user_id: value.target_user_id.to_string(),
            rating: value.rating.stars(),
            comment: value.comment,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<ReviewDto> for Review {
    type Error = ReviewValidationError;

    fn try_from(value: ReviewDto) -> Result<Self, Self::Error> {
        Review::new(ReviewDraft {
            id: ReviewId::new(value.id)?,
            author_id: UserId::new(value.author_id)?,
            target_user_id: UserId::new(value.target_user_id)?,
            rating: ReviewRating::new(value.rating)?,
            comment: value.comment,
            created_at: value.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn author() -> UserId {
        UserId::random()
    }

    fn review(author: &UserId, target: &UserId, stars: u8) -> Review {
        Review::new(ReviewDraft {
            id: ReviewId::random(),
            author_id: author.clone(),
            target_user_id: target.clone(),
            rating: ReviewRating::new(stars).expect("valid stars"),
            comment: "Patient teacher".to_owned(),
            created_at: Utc::now(),
        })
        .expect("valid review")
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn rejects_out_of_range_stars(#[case] stars: u8) {
        assert_eq!(
            ReviewRating::new(stars),
            Err(ReviewValidationError::RatingOutOfRange(stars))
        );
    }

    #[rstest]
    fn rejects_self_review(author: UserId) {
        let error = Review::new(ReviewDraft {
            id: ReviewId::random(),
            author_id: author.clone(),
            target_user_id: author,
            rating: ReviewRating::new(5).expect("valid stars"),
            comment: String::new(),
            created_at: Utc::now(),
        })
        .expect_err("self review");
        assert_eq!(error, ReviewValidationError::SelfReview);
    }

    #[rstest]
    fn summarises_average_and_count(author: UserId) {
        let target = UserId::random();
        let reviews = [review(&author, &target, 5), review(&author, &target, 4)];

        let summary = RatingSummary::from_reviews(&reviews);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Some(4.5));
    }

    #[rstest]
    fn deserialises_camel_case_payload(author: UserId) {
        let target = UserId::random();
        let payload = json!({
            "id": ReviewId::random().to_string(),
            "authorId": author.to_string(),
            "targetUserId": target.to_string(),
            "rating": 3,
            "comment": "Helpful",
            "createdAt": "2024-03-02T10:00:00Z"
        });

        let parsed: Review = serde_json::from_value(payload).expect("valid review");

        assert_eq!(parsed.rating().stars(), 3);
        assert_eq!(parsed.target_user_id(), &target);
    }

    #[rstest]
    fn deserialisation_rejects_zero_stars(author: UserId) {
        let payload = json!({
            "id": ReviewId::random().to_string(),
            "authorId": author.to_string(),
            "targetUserId": UserId::random().to_string(),
            "rating": 0,
            "createdAt": "2024-03-02T10:00:00Z"
        });
        assert!(serde_json::from_value::<Review>(payload).is_err());
    }
}
