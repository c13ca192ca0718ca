//! Skill swap requests and their status lifecycle.
//!
//! ```text
//! pending ──respond──▶ accepted ──complete──▶ completed
//!    │                                          (terminal)
//!    ├──respond──▶ rejected (terminal)
//!    └──cancel───▶ removed (requester only)
//! ```
//!
//! Transitions return new values; callers persist them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::UserId;

/// Stable swap identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SwapId(Uuid);

impl SwapId {
    /// Parse a swap identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, SwapValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| SwapValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SwapId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SwapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SwapId> for String {
    fn from(value: SwapId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for SwapId {
    type Error = SwapValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    /// Awaiting the recipient's decision.
    Pending,
    /// Accepted by the recipient; the exchange is under way.
    Accepted,
    /// Declined by the recipient. Terminal.
    Rejected,
    /// Exchange finished. Terminal.
    Completed,
}

impl SwapStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipient's answer to a pending swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapDecision {
    /// Accept the request.
    Accepted,
    /// Decline the request.
    Rejected,
}

impl SwapDecision {
    /// Status the swap moves to for this decision.
    pub fn status(self) -> SwapStatus {
        match self {
            Self::Accepted => SwapStatus::Accepted,
            Self::Rejected => SwapStatus::Rejected,
        }
    }
}

/// Operation attempted on a swap, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    /// Accept or reject.
    Respond,
    /// Withdraw a pending request.
    Cancel,
    /// Mark an accepted swap as finished.
    Complete,
}

impl fmt::Display for SwapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Respond => "respond to",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        })
    }
}

/// Validation errors raised when constructing swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapValidationError {
    /// Identifier text was not a UUID.
    #[error("swap id must be a valid UUID")]
    InvalidId,
    /// Requester and recipient are the same user.
    #[error("a swap requires two distinct users")]
    SameParticipants,
    /// `updated_at` precedes `created_at`.
    #[error("swap update time precedes its creation time")]
    UpdatedBeforeCreated,
}

/// Errors raised by swap state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapTransitionError {
    /// The acting user is not the party allowed to perform the action.
    #[error("user {actor} may not {action} swap {swap_id}")]
    NotAuthorized {
        /// Attempted operation.
        action: SwapAction,
        /// Acting user.
        actor: UserId,
        /// Target swap.
        swap_id: SwapId,
    },
    /// The swap's current status does not allow the action.
    #[error("cannot {action} swap {swap_id} while it is {status}")]
    InvalidTransition {
        /// Attempted operation.
        action: SwapAction,
        /// Status at the time of the attempt.
        status: SwapStatus,
        /// Target swap.
        swap_id: SwapId,
    },
}

/// Input payload for [`Swap::new`].
#[derive(Debug, Clone)]
pub struct SwapDraft {
    /// Stable identifier.
    pub id: SwapId,
    /// Requester.
    pub from_user_id: UserId,
    /// Recipient.
    pub to_user_id: UserId,
    /// Current status.
    pub status: SwapStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last status change.
    pub updated_at: DateTime<Utc>,
}

/// A directional skill swap request between two users.
///
/// ## Invariants
/// - `from_user_id != to_user_id`.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SwapDto", into = "SwapDto")]
pub struct Swap {
    id: SwapId,
    from_user_id: UserId,
    to_user_id: UserId,
    status: SwapStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Swap {
    /// Build a swap from a draft, validating its invariants.
    pub fn new(draft: SwapDraft) -> Result<Self, SwapValidationError> {
        if draft.from_user_id == draft.to_user_id {
            return Err(SwapValidationError::SameParticipants);
        }
        if draft.updated_at < draft.created_at {
            return Err(SwapValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id: draft.id,
            from_user_id: draft.from_user_id,
            to_user_id: draft.to_user_id,
            status: draft.status,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Open a new pending request from `from` to `to`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Swap, SwapId, SwapStatus, UserId};
    /// use chrono::Utc;
    ///
    /// let swap = Swap::request(SwapId::random(), UserId::random(), UserId::random(), Utc::now())
    ///     .expect("distinct users");
    /// assert_eq!(swap.status(), SwapStatus::Pending);
    /// ```
    pub fn request(
        id: SwapId,
        from: UserId,
        to: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, SwapValidationError> {
        Self::new(SwapDraft {
            id,
            from_user_id: from,
            to_user_id: to,
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> SwapId {
        self.id
    }

    /// Requester.
    pub fn from_user_id(&self) -> &UserId {
        &self.from_user_id
    }

    /// Recipient.
    pub fn to_user_id(&self) -> &UserId {
        &self.to_user_id
    }

    /// Current status.
    pub fn status(&self) -> SwapStatus {
        self.status
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last status change.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user_id` is the requester or the recipient.
    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.from_user_id == user_id || &self.to_user_id == user_id
    }

    /// Accept or reject a pending swap. Only the recipient may respond.
    pub fn respond(
        &self,
        decision: SwapDecision,
        actor: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, SwapTransitionError> {
        if actor != &self.to_user_id {
            return Err(self.not_authorized(SwapAction::Respond, actor));
        }
        self.require_status(SwapAction::Respond, SwapStatus::Pending)?;
        Ok(self.with_status(decision.status(), now))
    }

    /// Check that `actor` may withdraw this swap.
    ///
    /// Only the requester may cancel, and only while the swap is pending.
    /// Cancelling removes the swap, so there is no resulting value.
    pub fn ensure_cancellable_by(&self, actor: &UserId) -> Result<(), SwapTransitionError> {
        if actor != &self.from_user_id {
            return Err(self.not_authorized(SwapAction::Cancel, actor));
        }
        self.require_status(SwapAction::Cancel, SwapStatus::Pending)
    }

    /// Mark an accepted swap as completed. Either participant may complete.
    pub fn complete(
        &self,
        actor: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, SwapTransitionError> {
        self.require_status(SwapAction::Complete, SwapStatus::Accepted)?;
        if !self.involves(actor) {
            return Err(self.not_authorized(SwapAction::Complete, actor));
        }
        Ok(self.with_status(SwapStatus::Completed, now))
    }

    fn require_status(
        &self,
        action: SwapAction,
        required: SwapStatus,
    ) -> Result<(), SwapTransitionError> {
        if self.status == required {
            Ok(())
        } else {
            Err(SwapTransitionError::InvalidTransition {
                action,
                status: self.status,
                swap_id: self.id,
            })
        }
    }

    fn not_authorized(&self, action: SwapAction, actor: &UserId) -> SwapTransitionError {
        SwapTransitionError::NotAuthorized {
            action,
            actor: actor.clone(),
            swap_id: self.id,
        }
    }

    fn with_status(&self, status: SwapStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            // Clock skew must not break `updated_at >= created_at`.
            updated_at: now.max(self.created_at),
            ..self.clone()
        }
    }
}

/// A user's swaps split the way the swaps page lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapBuckets {
    /// Pending requests addressed to the current user.
    pub incoming: Vec<Swap>,
    /// Pending requests the current user sent.
    pub sent: Vec<Swap>,
    /// Every non-pending swap, regardless of direction.
    pub history: Vec<Swap>,
}

impl SwapBuckets {
    /// Partition swaps already scoped to `current_user`.
    ///
    /// Relative order within each bucket follows the input order.
    pub fn partition(swaps: &[Swap], current_user: &UserId) -> Self {
        let mut buckets = Self::default();
        for swap in swaps {
            match swap.status {
                SwapStatus::Pending if &swap.to_user_id == current_user => {
                    buckets.incoming.push(swap.clone());
                }
                SwapStatus::Pending if &swap.from_user_id == current_user => {
                    buckets.sent.push(swap.clone());
                }
                SwapStatus::Pending => {}
                _ => buckets.history.push(swap.clone()),
            }
        }
        buckets
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapDto {
    id: String,
    from_user_id: String,
    to_user_id: String,
    status: SwapStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Error raised when a serialised swap fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapDecodeError {
    /// A participant id was invalid.
    #[error(transparent)]
    User(#[from] super::UserValidationError),
    /// The swap itself was invalid.
    #[error(transparent)]
    Swap(#[from] SwapValidationError),
}

impl From<Swap> for SwapDto {
    fn from(value: Swap) -> Self {
        Self {
            id: value.id.to_string(),
            from_user_id: value.from_user_id.to_string(),
            to_user_id: value.to_user_id.to_string(),
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<SwapDto> for Swap {
    type Error = SwapDecodeError;

    fn try_from(value: SwapDto) -> Result<Self, Self::Error> {
        Ok(Swap::new(SwapDraft {
            id: SwapId::new(value.id)?,
            from_user_id: UserId::new(value.from_user_id)?,
            to_user_id: UserId::new(value.to_user_id)?,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })?)
    }
}
