//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the wire shape of their domain counterparts and exist
//! only for documentation.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The acting user may not perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The swap is not in a state that allows the change.
    #[schema(rename = "invalid_transition")]
    InvalidTransition,
    /// The suggestion generator or the store is unavailable.
    #[schema(rename = "upstream_unavailable")]
    UpstreamUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_transition")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "cannot complete swap while it is pending")]
    message: String,
    /// Correlation identifier, also sent in the `Trace-Id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Priya Sharma")]
    name: String,
    email: String,
    #[schema(example = "Pune")]
    location: String,
    avatar_url: String,
    #[schema(example = json!(["Guitar", "Music Theory"]))]
    skills_offered: Vec<String>,
    #[schema(example = json!(["Spanish"]))]
    skills_wanted: Vec<String>,
    #[schema(example = "Weekends")]
    availability: String,
    /// Aggregate rating in `0.0..=5.0`.
    #[schema(minimum = 0.0, maximum = 5.0, example = 4.5)]
    rating: f64,
    /// Number of reviews behind the rating.
    reviews: u32,
}

/// OpenAPI schema for [`crate::domain::SwapStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SwapStatus)]
pub enum SwapStatusSchema {
    #[schema(rename = "pending")]
    Pending,
    #[schema(rename = "accepted")]
    Accepted,
    #[schema(rename = "rejected")]
    Rejected,
    #[schema(rename = "completed")]
    Completed,
}

/// OpenAPI schema for [`crate::domain::Swap`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Swap)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SwapSchema {
    id: String,
    /// Requester.
    from_user_id: String,
    /// Recipient.
    to_user_id: String,
    status: SwapStatusSchema,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::SwapBuckets`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SwapBuckets)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SwapBucketsSchema {
    /// Pending swaps addressed to the current user.
    incoming: Vec<SwapSchema>,
    /// Pending swaps the current user sent.
    sent: Vec<SwapSchema>,
    /// Swaps that are no longer pending.
    history: Vec<SwapSchema>,
}

/// OpenAPI schema for [`crate::domain::Review`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Review)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    id: String,
    author_id: String,
    target_user_id: String,
    #[schema(minimum = 1, maximum = 5)]
    rating: u8,
    comment: String,
    #[schema(format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::RatingSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RatingSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RatingSummarySchema {
    /// Mean of the review ratings; absent when there are no reviews.
    average: Option<f64>,
    count: u32,
}

/// OpenAPI schema for [`crate::domain::ProfileView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProfileView)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileViewSchema {
    user: UserSchema,
    reviews: Vec<ReviewSchema>,
    rating_summary: RatingSummarySchema,
}

/// OpenAPI schema for [`crate::domain::SkillSuggestions`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SkillSuggestions)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SkillSuggestionsSchema {
    #[schema(example = json!(["Music Theory", "Songwriting"]))]
    suggested_skills: Vec<String>,
    /// Related skills keyed by suggested skill.
    skill_matches: BTreeMap<String, Vec<String>>,
}
