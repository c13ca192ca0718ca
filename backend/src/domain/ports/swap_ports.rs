//! Driving ports for the swaps page.

use async_trait::async_trait;

use crate::domain::{Error, SessionContext, Swap, SwapBuckets, SwapDecision, SwapId, UserId};

/// Domain use-case port for listing the current user's swaps.
#[async_trait]
pub trait SwapQuery: Send + Sync {
    /// Incoming, sent and historical swaps for the current user.
    async fn swap_buckets(&self, ctx: &SessionContext) -> Result<SwapBuckets, Error>;
}

/// Domain use-case port for swap lifecycle changes.
#[async_trait]
pub trait SwapCommand: Send + Sync {
    /// Open a pending request from the current user to `to`.
    async fn request_swap(&self, ctx: &SessionContext, to: &UserId) -> Result<Swap, Error>;

    /// Accept or reject an incoming request.
    async fn respond(
        &self,
        ctx: &SessionContext,
        swap_id: SwapId,
        decision: SwapDecision,
    ) -> Result<Swap, Error>;

    /// Withdraw a sent request.
    async fn cancel(&self, ctx: &SessionContext, swap_id: SwapId) -> Result<(), Error>;

    /// Mark an accepted swap as completed.
    async fn complete(&self, ctx: &SessionContext, swap_id: SwapId) -> Result<Swap, Error>;
}
