//! Directory and profile domain services.
//!
//! Implements the directory browsing and profile driving ports over a
//! [`DirectoryRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    DirectoryQuery, DirectoryRepository, DirectoryRepositoryError, ProfileEdit,
    UserProfileCommand, UserProfileQuery,
};
use crate::domain::{
    Command, Error, ProfileField, ProfileValidationError, ProfileView, SessionContext,
    SessionState, User, UserId, commit, replay, search,
};

/// Directory service implementing the browsing and profile driving ports.
#[derive(Clone)]
pub struct DirectoryService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DirectoryService<R> {
    /// Create a new service over `repo`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

/// Map a store failure into a domain error.
pub(crate) fn map_repository_error(error: DirectoryRepositoryError) -> Error {
    match error {
        DirectoryRepositoryError::Connection { message } => {
            Error::upstream(format!("directory store unavailable: {message}"))
        }
        DirectoryRepositoryError::Query { message } => {
            Error::internal(format!("directory store error: {message}"))
        }
        DirectoryRepositoryError::NotFound { message } => Error::not_found(message),
        DirectoryRepositoryError::Conflict { message } => {
            Error::invalid_transition(format!("record changed concurrently: {message}"))
                .with_details(json!({ "code": "concurrent_update" }))
        }
    }
}

/// Load the session's user or fail with `not_found`.
pub(crate) async fn load_user<R>(repo: &R, id: &UserId) -> Result<User, Error>
where
    R: DirectoryRepository + ?Sized,
{
    repo.user(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| {
            Error::not_found(format!("user {id} not found"))
                .with_details(json!({ "userId": id.to_string() }))
        })
}

fn map_profile_error(error: ProfileValidationError) -> Error {
    let code = match &error {
        ProfileValidationError::UnknownField(_) => "unknown_field",
        ProfileValidationError::EmptyName => "empty_name",
        ProfileValidationError::InvalidEmail => "invalid_email",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": code,
    }))
}

fn parse_edits(edits: Vec<ProfileEdit>) -> Result<Vec<Command>, Error> {
    edits
        .into_iter()
        .map(|edit| {
            let field = edit
                .field
                .parse::<ProfileField>()
                .map_err(map_profile_error)?;
            Ok(Command::UpdateProfileField {
                field,
                raw_value: edit.raw_value,
            })
        })
        .collect()
}

#[async_trait]
impl<R> DirectoryQuery for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn list_users(&self, term: &str) -> Result<Vec<User>, Error> {
        let users = self.repo.users().await.map_err(map_repository_error)?;
        let matches: Vec<User> = search(&users, term).into_iter().cloned().collect();
        debug!(term, total = users.len(), matched = matches.len(), "directory search");
        Ok(matches)
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        load_user(self.repo.as_ref(), id).await
    }
}

#[async_trait]
impl<R> UserProfileQuery for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn fetch_profile(&self, ctx: &SessionContext) -> Result<ProfileView, Error> {
        let user = load_user(self.repo.as_ref(), ctx.user_id()).await?;
        let reviews = self
            .repo
            .reviews_for_user(ctx.user_id())
            .await
            .map_err(map_repository_error)?;
        Ok(ProfileView::new(user, reviews))
    }
}

#[async_trait]
impl<R> UserProfileCommand for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn update_profile(
        &self,
        ctx: &SessionContext,
        edits: Vec<ProfileEdit>,
    ) -> Result<User, Error> {
        let commands = parse_edits(edits)?;
        let current_user = load_user(self.repo.as_ref(), ctx.user_id()).await?;
        let state = SessionState {
            current_user,
            swaps: Vec::new(),
        };
        let state = replay(state, &commands, self.clock.utc())?;

        let user = commit(state.current_user).map_err(map_profile_error)?;
        self.repo
            .save_user(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id(), edits = commands.len(), "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
