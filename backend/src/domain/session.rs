//! Session reducer for the current user's swaps and profile.
//!
//! A [`SessionState`] is an immutable snapshot. [`apply`] turns a
//! [`Command`] into the next snapshot plus the single [`StateChange`] the
//! caller must persist. The acting user is always the snapshot's current
//! user.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::{
    Error, ProfileField, Swap, SwapDecision, SwapId, SwapStatus, SwapTransitionError, User,
    UserId, update_field,
};

/// Who is acting in this process. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: UserId,
}

impl SessionContext {
    /// Create a context for `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// The acting user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Snapshot of the current user and the swaps they take part in.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Acting user.
    pub current_user: User,
    /// Swaps involving the acting user.
    pub swaps: Vec<Swap>,
}

/// User intent applied through [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Accept or reject an incoming request.
    RespondToSwap {
        /// Target swap.
        swap_id: SwapId,
        /// Recipient's answer.
        decision: SwapDecision,
    },
    /// Withdraw a sent request.
    CancelSwap {
        /// Target swap.
        swap_id: SwapId,
    },
    /// Mark an accepted swap as finished.
    CompleteSwap {
        /// Target swap.
        swap_id: SwapId,
    },
    /// Edit one profile field from raw form input.
    UpdateProfileField {
        /// Field being edited.
        field: ProfileField,
        /// Raw input value.
        raw_value: String,
    },
}

/// The one write a command produces.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// A swap moved to a new status.
    SwapUpdated {
        /// Swap after the transition.
        swap: Swap,
        /// Status the transition started from.
        previous_status: SwapStatus,
    },
    /// A pending swap was cancelled.
    SwapRemoved {
        /// Removed swap.
        swap_id: SwapId,
    },
    /// The current user's profile changed.
    ProfileUpdated(User),
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Snapshot after the command.
    pub state: SessionState,
    /// Change to persist.
    pub change: StateChange,
}

/// Apply `command` to `state` at time `now`.
///
/// # Errors
/// - `not_found` when the swap is not part of the snapshot.
/// - `forbidden` when the current user may not act on the swap.
/// - `invalid_transition` when the swap status does not allow the command.
pub fn apply(
    state: &SessionState,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<Transition, Error> {
    let actor = state.current_user.id();
    match command {
        Command::RespondToSwap { swap_id, decision } => {
            let swap = find_swap(state, *swap_id)?;
            let updated = swap
                .respond(*decision, actor, now)
                .map_err(map_transition_error)?;
            Ok(replace_swap(state, swap.status(), updated))
        }
        Command::CompleteSwap { swap_id } => {
            let swap = find_swap(state, *swap_id)?;
            let updated = swap.complete(actor, now).map_err(map_transition_error)?;
            Ok(replace_swap(state, swap.status(), updated))
        }
        Command::CancelSwap { swap_id } => {
            let swap = find_swap(state, *swap_id)?;
            swap.ensure_cancellable_by(actor)
                .map_err(map_transition_error)?;
            let swaps = state
                .swaps
                .iter()
                .filter(|candidate| candidate.id() != *swap_id)
                .cloned()
                .collect();
            Ok(Transition {
                state: SessionState {
                    current_user: state.current_user.clone(),
                    swaps,
                },
                change: StateChange::SwapRemoved { swap_id: *swap_id },
            })
        }
        Command::UpdateProfileField { field, raw_value } => {
            let user = update_field(&state.current_user, *field, raw_value);
            Ok(Transition {
                state: SessionState {
                    current_user: user.clone(),
                    swaps: state.swaps.clone(),
                },
                change: StateChange::ProfileUpdated(user),
            })
        }
    }
}

/// Fold `commands` over `state` in order.
///
/// Replaying the same commands at the same time yields the same snapshot.
pub fn replay<'a>(
    state: SessionState,
    commands: impl IntoIterator<Item = &'a Command>,
    now: DateTime<Utc>,
) -> Result<SessionState, Error> {
    commands
        .into_iter()
        .try_fold(state, |current, command| {
            apply(&current, command, now).map(|transition| transition.state)
        })
}

fn find_swap(state: &SessionState, swap_id: SwapId) -> Result<&Swap, Error> {
    state
        .swaps
        .iter()
        .find(|swap| swap.id() == swap_id)
        .ok_or_else(|| {
            Error::not_found(format!("swap {swap_id} not found"))
                .with_details(json!({ "swapId": swap_id.to_string() }))
        })
}

fn replace_swap(state: &SessionState, previous_status: SwapStatus, updated: Swap) -> Transition {
    let swaps = state
        .swaps
        .iter()
        .map(|swap| {
            if swap.id() == updated.id() {
                updated.clone()
            } else {
                swap.clone()
            }
        })
        .collect();
    Transition {
        state: SessionState {
            current_user: state.current_user.clone(),
            swaps,
        },
        change: StateChange::SwapUpdated {
            swap: updated,
            previous_status,
        },
    }
}

/// Convert a swap transition failure into a domain error.
fn map_transition_error(error: SwapTransitionError) -> Error {
    match &error {
        SwapTransitionError::NotAuthorized { swap_id, .. } => Error::forbidden(error.to_string())
            .with_details(json!({ "swapId": swap_id.to_string() })),
        SwapTransitionError::InvalidTransition {
            swap_id, status, ..
        } => Error::invalid_transition(error.to_string()).with_details(json!({
            "swapId": swap_id.to_string(),
            "status": status.as_str(),
        })),
    }
}
