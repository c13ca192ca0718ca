//! Domain entities, ports and services.
//!
//! Purpose: define the skill-exchange directory model and its rules
//! independently of transport and storage. Entities are immutable values
//! that validate their invariants on construction and document their serde
//! contracts in Rustdoc.
//!
//! Public surface:
//! - [`User`], [`Swap`], [`Review`] and their identifiers.
//! - [`search`], [`update_field`], [`commit`] and the swap transitions.
//! - [`apply`] and [`replay`] for the session reducer.
//! - [`Error`] and [`ErrorCode`], the transport-agnostic failure payload.
//! - Services implementing the driving ports in [`ports`].

pub mod directory;
pub mod directory_service;
pub mod error;
pub mod ports;
pub mod profile;
pub mod review;
pub mod session;
pub mod skills;
pub mod suggestion;
pub mod suggestion_service;
pub mod swap;
pub mod swap_service;
pub mod trace_id;
pub mod user;

pub use self::directory::search;
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::profile::{ProfileField, ProfileValidationError, ProfileView, commit, update_field};
pub use self::review::{
    RatingSummary, Review, ReviewDraft, ReviewId, ReviewRating, ReviewValidationError,
};
pub use self::session::{
    Command, SessionContext, SessionState, StateChange, Transition, apply, replay,
};
pub use self::skills::SkillList;
pub use self::suggestion::{
    SUGGESTION_MIN_CHARS, SkillDescription, SkillSuggestions, SuggestionValidationError,
};
pub use self::suggestion_service::{
    DESCRIPTION_TOO_SHORT_MESSAGE, SUGGESTION_UNAVAILABLE_MESSAGE, SkillSuggestionService,
};
pub use self::swap::{
    Swap, SwapAction, SwapBuckets, SwapDecision, SwapDecodeError, SwapDraft, SwapId, SwapStatus,
    SwapTransitionError, SwapValidationError,
};
pub use self::swap_service::SwapService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{RATING_MAX, Rating, User, UserDraft, UserId, UserValidationError};
