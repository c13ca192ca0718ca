//! Current user's profile HTTP handlers.
//!
//! ```text
//! GET /api/v1/profile
//! PATCH /api/v1/profile {"name":"Ada","skillsOffered":"Rust, Go"}
//! ```

use actix_web::{get, patch, web};
use serde_json::{Map, Value, json};

use crate::domain::ports::ProfileEdit;
use crate::domain::{Error, ProfileView, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ProfileViewSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Fetch the current user with the reviews written about them.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Current user's profile", body = ProfileViewSchema),
        (status = 404, description = "Current user not in the directory", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(state: web::Data<HttpState>) -> ApiResult<web::Json<ProfileView>> {
    let view = state.profile.fetch_profile(&state.session).await?;
    Ok(web::Json(view))
}

fn parse_profile_edits(payload: Map<String, Value>) -> Result<Vec<ProfileEdit>, Error> {
    payload
        .into_iter()
        .map(|(field, value)| match value {
            Value::String(raw_value) => Ok(ProfileEdit { field, raw_value }),
            _ => Err(
                Error::invalid_request(format!("{field} must be a string")).with_details(json!({
                    "field": field,
                    "code": "invalid_type",
                })),
            ),
        })
        .collect()
}

/// Apply raw form edits to the current user's profile and save it.
///
/// Skill fields take comma-separated text. Edits are applied in field-name
/// order and the whole update is rejected if any edit is invalid.
#[utoipa::path(
    patch,
    path = "/api/v1/profile",
    request_body(
        content = Object,
        description = "Map of profile field name to raw string value"
    ),
    responses(
        (status = 200, description = "Saved profile", body = UserSchema),
        (status = 400, description = "Unknown field or invalid value", body = ErrorSchema),
        (status = 503, description = "Directory store unavailable", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[patch("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<User>> {
    let edits = parse_profile_edits(payload.into_inner())?;
    let user = state
        .profile_command
        .update_profile(&state.session, edits)
        .await?;
    Ok(web::Json(user))
}
