//! Driven port for the directory store holding users, swaps and reviews.

use async_trait::async_trait;

use crate::domain::{Review, Swap, SwapId, SwapStatus, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory store adapters.
    pub enum DirectoryRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "directory store connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "directory store query failed: {message}",
        /// The record targeted by a write does not exist.
        NotFound { message: String } => "directory record not found: {message}",
        /// The stored record changed since it was read.
        Conflict { message: String } => "directory write conflict: {message}",
    }
}

/// Read and write access to the directory.
///
/// Swap writes carry the status the caller's transition started from. The
/// adapter must reject the write with [`DirectoryRepositoryError::Conflict`]
/// when the stored swap no longer has that status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Fetch one user.
    async fn user(&self, id: &UserId) -> Result<Option<User>, DirectoryRepositoryError>;

    /// Every user, in directory order.
    async fn users(&self) -> Result<Vec<User>, DirectoryRepositoryError>;

    /// Swaps where `id` is the requester or the recipient.
    async fn swaps_for_user(&self, id: &UserId) -> Result<Vec<Swap>, DirectoryRepositoryError>;

    /// Reviews targeting `id`.
    async fn reviews_for_user(&self, id: &UserId)
    -> Result<Vec<Review>, DirectoryRepositoryError>;

    /// Replace an existing user record.
    async fn save_user(&self, user: &User) -> Result<(), DirectoryRepositoryError>;

    /// Store a newly requested swap.
    async fn insert_swap(&self, swap: &Swap) -> Result<(), DirectoryRepositoryError>;

    /// Replace a swap whose stored status is still `expected_status`.
    async fn save_swap(
        &self,
        swap: &Swap,
        expected_status: SwapStatus,
    ) -> Result<(), DirectoryRepositoryError>;

    /// Delete a swap whose stored status is still `expected_status`.
    async fn remove_swap(
        &self,
        id: &SwapId,
        expected_status: SwapStatus,
    ) -> Result<(), DirectoryRepositoryError>;
}
