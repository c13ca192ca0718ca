//! Driving port for browsing the directory.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for directory browsing.
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Users matching `term`; every user when `term` is empty.
    async fn list_users(&self, term: &str) -> Result<Vec<User>, Error>;

    /// One user by id.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}
