//! Skill suggestion HTTP handler.
//!
//! ```text
//! POST /api/v1/skill-suggestions {"skillDescription":"I teach beginner guitar"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::SkillSuggestions;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SkillSuggestionsSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

/// Request body for `POST /api/v1/skill-suggestions`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestionRequest {
    /// Free-text description of what the user can teach.
    #[schema(example = "I have played acoustic guitar for ten years")]
    pub skill_description: Option<String>,
}

/// Suggest skill labels for a free-text description.
#[utoipa::path(
    post,
    path = "/api/v1/skill-suggestions",
    request_body = SkillSuggestionRequest,
    responses(
        (status = 200, description = "Suggested skills", body = SkillSuggestionsSchema),
        (status = 400, description = "Description shorter than 10 characters", body = ErrorSchema),
        (status = 503, description = "Suggestion provider unavailable", body = ErrorSchema)
    ),
    tags = ["suggestions"],
    operation_id = "suggestSkills"
)]
#[post("/skill-suggestions")]
pub async fn suggest_skills(
    state: web::Data<HttpState>,
    payload: web::Json<SkillSuggestionRequest>,
) -> ApiResult<web::Json<SkillSuggestions>> {
    let description = payload
        .into_inner()
        .skill_description
        .ok_or_else(|| missing_field_error("skillDescription"))?;
    let suggestions = state.suggestions.suggest(&description).await?;
    Ok(web::Json(suggestions))
}
