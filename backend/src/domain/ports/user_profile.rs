//! Driving ports for reading and editing the current user's profile.

use async_trait::async_trait;

use crate::domain::{Error, ProfileView, SessionContext, User};

/// One raw form edit: a wire field name and the value typed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEdit {
    /// Field name such as `skillsOffered`.
    pub field: String,
    /// Raw input value.
    pub raw_value: String,
}

/// Domain use-case port for reading the current user's profile.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// The current user and the reviews about them.
    async fn fetch_profile(&self, ctx: &SessionContext) -> Result<ProfileView, Error>;
}

/// Domain use-case port for saving profile edits.
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply `edits` in order, validate and persist the result.
    async fn update_profile(
        &self,
        ctx: &SessionContext,
        edits: Vec<ProfileEdit>,
    ) -> Result<User, Error>;
}
