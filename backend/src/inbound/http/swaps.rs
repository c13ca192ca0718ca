//! Swap request HTTP handlers.
//!
//! ```text
//! GET /api/v1/swaps
//! POST /api/v1/swaps {"toUserId":"..."}
//! POST /api/v1/swaps/{id}/respond {"decision":"accepted"}
//! POST /api/v1/swaps/{id}/complete
//! DELETE /api/v1/swaps/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Swap, SwapBuckets};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SwapBucketsSchema, SwapSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    missing_field_error, parse_decision, parse_swap_id, parse_user_id,
};

/// Request body for `POST /api/v1/swaps`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequestBody {
    /// Recipient of the request.
    pub to_user_id: Option<String>,
}

/// Request body for `POST /api/v1/swaps/{id}/respond`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SwapResponseBody {
    /// `accepted` or `rejected`.
    #[schema(example = "accepted")]
    pub decision: Option<String>,
}

/// List the current user's swaps split into incoming, sent and history.
#[utoipa::path(
    get,
    path = "/api/v1/swaps",
    responses(
        (status = 200, description = "Swap buckets", body = SwapBucketsSchema),
        (status = 503, description = "Directory store unavailable", body = ErrorSchema)
    ),
    tags = ["swaps"],
    operation_id = "listSwaps"
)]
#[get("/swaps")]
pub async fn list_swaps(state: web::Data<HttpState>) -> ApiResult<web::Json<SwapBuckets>> {
    let buckets = state.swaps.swap_buckets(&state.session).await?;
    Ok(web::Json(buckets))
}

/// Send a swap request from the current user.
#[utoipa::path(
    post,
    path = "/api/v1/swaps",
    request_body = SwapRequestBody,
    responses(
        (status = 201, description = "Pending swap created", body = SwapSchema),
        (status = 400, description = "Invalid recipient", body = ErrorSchema),
        (status = 404, description = "Unknown recipient", body = ErrorSchema)
    ),
    tags = ["swaps"],
    operation_id = "requestSwap"
)]
#[post("/swaps")]
pub async fn request_swap(
    state: web::Data<HttpState>,
    payload: web::Json<SwapRequestBody>,
) -> ApiResult<HttpResponse> {
    let raw = payload
        .into_inner()
        .to_user_id
        .ok_or_else(|| missing_field_error("toUserId"))?;
    let to = parse_user_id(&raw, "toUserId")?;
    let swap = state.swap_commands.request_swap(&state.session, &to).await?;
    Ok(HttpResponse::Created().json(swap))
}

/// Accept or reject an incoming swap.
#[utoipa::path(
    post,
    path = "/api/v1/swaps/{id}/respond",
    params(("id" = String, Path, description = "Swap identifier")),
    request_body = SwapResponseBody,
    responses(
        (status = 200, description = "Updated swap", body = SwapSchema),
        (status = 400, description = "Invalid decision", body = ErrorSchema),
        (status = 403, description = "Current user is not the recipient", body = ErrorSchema),
        (status = 404, description = "Unknown swap", body = ErrorSchema),
        (status = 409, description = "Swap is no longer pending", body = ErrorSchema)
    ),
    tags = ["swaps"],
    operation_id = "respondToSwap"
)]
#[post("/swaps/{id}/respond")]
pub async fn respond_to_swap(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SwapResponseBody>,
) -> ApiResult<web::Json<Swap>> {
    let swap_id = parse_swap_id(&path.into_inner(), "id")?;
    let raw = payload
        .into_inner()
        .decision
        .ok_or_else(|| missing_field_error("decision"))?;
    let decision = parse_decision(&raw)?;
    let swap = state
        .swap_commands
        .respond(&state.session, swap_id, decision)
        .await?;
    Ok(web::Json(swap))
}

/// Mark an accepted swap as completed. Either participant may complete.
#[utoipa::path(
    post,
    path = "/api/v1/swaps/{id}/complete",
    params(("id" = String, Path, description = "Swap identifier")),
    responses(
        (status = 200, description = "Completed swap", body = SwapSchema),
        (status = 403, description = "Current user is not a participant", body = ErrorSchema),
        (status = 404, description = "Unknown swap", body = ErrorSchema),
        (status = 409, description = "Swap is not accepted", body = ErrorSchema)
    ),
    tags = ["swaps"],
    operation_id = "completeSwap"
)]
#[post("/swaps/{id}/complete")]
pub async fn complete_swap(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Swap>> {
    let swap_id = parse_swap_id(&path.into_inner(), "id")?;
    let swap = state
        .swap_commands
        .complete(&state.session, swap_id)
        .await?;
    Ok(web::Json(swap))
}

/// Withdraw a pending swap the current user sent.
#[utoipa::path(
    delete,
    path = "/api/v1/swaps/{id}",
    params(("id" = String, Path, description = "Swap identifier")),
    responses(
        (status = 204, description = "Swap removed"),
        (status = 403, description = "Current user is not the requester", body = ErrorSchema),
        (status = 404, description = "Unknown swap", body = ErrorSchema),
        (status = 409, description = "Swap is no longer pending", body = ErrorSchema)
    ),
    tags = ["swaps"],
    operation_id = "cancelSwap"
)]
#[delete("/swaps/{id}")]
pub async fn cancel_swap(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let swap_id = parse_swap_id(&path.into_inner(), "id")?;
    state.swap_commands.cancel(&state.session, swap_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "swaps_tests.rs"]
mod tests;
