//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer and the
//! schema wrappers that describe domain types without coupling them to
//! utoipa. The document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ProfileViewSchema, RatingSummarySchema, ReviewSchema,
    SkillSuggestionsSchema, SwapBucketsSchema, SwapSchema, SwapStatusSchema, UserSchema,
};
use crate::inbound::http::suggestions::SkillSuggestionRequest;
use crate::inbound::http::swaps::{SwapRequestBody, SwapResponseBody};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkillSetu backend API",
        description = "Skill-exchange directory: search users, manage swap requests, \
                       edit the current profile and get skill suggestions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::swaps::list_swaps,
        crate::inbound::http::swaps::request_swap,
        crate::inbound::http::swaps::respond_to_swap,
        crate::inbound::http::swaps::complete_swap,
        crate::inbound::http::swaps::cancel_swap,
        crate::inbound::http::suggestions::suggest_skills,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorCodeSchema,
        ErrorSchema,
        UserSchema,
        SwapStatusSchema,
        SwapSchema,
        SwapBucketsSchema,
        ReviewSchema,
        RatingSummarySchema,
        ProfileViewSchema,
        SkillSuggestionsSchema,
        SwapRequestBody,
        SwapResponseBody,
        SkillSuggestionRequest,
    )),
    tags(
        (name = "users", description = "Directory search and lookup"),
        (name = "profile", description = "Current user's profile"),
        (name = "swaps", description = "Skill swap requests"),
        (name = "suggestions", description = "Generated skill suggestions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
