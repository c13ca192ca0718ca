//! Swap lifecycle domain service.
//!
//! Each operation loads the current user's session snapshot, applies one
//! [`Command`] through the reducer and persists the resulting change with the
//! status it was computed from, so a concurrent change surfaces as a conflict.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::directory_service::{load_user, map_repository_error};
use crate::domain::ports::{DirectoryRepository, SwapCommand, SwapQuery};
use crate::domain::{
    Command, Error, SessionContext, SessionState, StateChange, Swap, SwapBuckets, SwapDecision,
    SwapId, SwapStatus, SwapValidationError, UserId, apply,
};

/// Swap service implementing the swap driving ports.
#[derive(Clone)]
pub struct SwapService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SwapService<R> {
    /// Create a new service over `repo`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_request_error(error: SwapValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({ "field": "toUserId" }))
}

impl<R> SwapService<R>
where
    R: DirectoryRepository,
{
    async fn load_session(&self, ctx: &SessionContext) -> Result<SessionState, Error> {
        let current_user = load_user(self.repo.as_ref(), ctx.user_id()).await?;
        let swaps = self
            .repo
            .swaps_for_user(ctx.user_id())
            .await
            .map_err(map_repository_error)?;
        Ok(SessionState {
            current_user,
            swaps,
        })
    }

    async fn persist(&self, change: &StateChange) -> Result<(), Error> {
        let result = match change {
            StateChange::SwapUpdated {
                swap,
                previous_status,
            } => self.repo.save_swap(swap, *previous_status).await,
            StateChange::SwapRemoved { swap_id } => {
                self.repo.remove_swap(swap_id, SwapStatus::Pending).await
            }
            StateChange::ProfileUpdated(user) => self.repo.save_user(user).await,
        };
        result.map_err(map_repository_error)
    }

    async fn run(&self, ctx: &SessionContext, command: Command) -> Result<StateChange, Error> {
        let state = self.load_session(ctx).await?;
        let transition = apply(&state, &command, self.clock.utc()).inspect_err(|error| {
            debug!(user_id = %ctx.user_id(), ?command, %error, "swap command refused");
        })?;
        self.persist(&transition.change).await?;
        Ok(transition.change)
    }

    async fn run_update(&self, ctx: &SessionContext, command: Command) -> Result<Swap, Error> {
        match self.run(ctx, command).await? {
            StateChange::SwapUpdated {
                swap,
                previous_status,
            } => {
                info!(
                    swap_id = %swap.id(),
                    from = %previous_status,
                    to = %swap.status(),
                    user_id = %ctx.user_id(),
                    "swap status changed"
                );
                Ok(swap)
            }
            other => Err(Error::internal(format!(
                "swap command produced unexpected change: {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl<R> SwapQuery for SwapService<R>
where
    R: DirectoryRepository,
{
    async fn swap_buckets(&self, ctx: &SessionContext) -> Result<SwapBuckets, Error> {
        let swaps = self
            .repo
            .swaps_for_user(ctx.user_id())
            .await
            .map_err(map_repository_error)?;
        Ok(SwapBuckets::partition(&swaps, ctx.user_id()))
    }
}

#[async_trait]
impl<R> SwapCommand for SwapService<R>
where
    R: DirectoryRepository,
{
    async fn request_swap(&self, ctx: &SessionContext, to: &UserId) -> Result<Swap, Error> {
        if to == ctx.user_id() {
            return Err(map_request_error(SwapValidationError::SameParticipants));
        }
        load_user(self.repo.as_ref(), ctx.user_id()).await?;
        load_user(self.repo.as_ref(), to).await?;

        let swap = Swap::request(
            SwapId::random(),
            ctx.user_id().clone(),
            to.clone(),
            self.clock.utc(),
        )
        .map_err(map_request_error)?;
        self.repo
            .insert_swap(&swap)
            .await
            .map_err(map_repository_error)?;
        info!(swap_id = %swap.id(), from = %ctx.user_id(), to = %to, "swap requested");
        Ok(swap)
    }

    async fn respond(
        &self,
        ctx: &SessionContext,
        swap_id: SwapId,
        decision: SwapDecision,
    ) -> Result<Swap, Error> {
        self.run_update(ctx, Command::RespondToSwap { swap_id, decision })
            .await
    }

    async fn cancel(&self, ctx: &SessionContext, swap_id: SwapId) -> Result<(), Error> {
        self.run(ctx, Command::CancelSwap { swap_id }).await?;
        info!(%swap_id, user_id = %ctx.user_id(), "swap cancelled");
        Ok(())
    }

    async fn complete(&self, ctx: &SessionContext, swap_id: SwapId) -> Result<Swap, Error> {
        self.run_update(ctx, Command::CompleteSwap { swap_id }).await
    }
}

#[cfg(test)]
#[path = "swap_service_tests.rs"]
mod tests;
