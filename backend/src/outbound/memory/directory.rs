//! `RwLock`-guarded in-memory implementation of [`DirectoryRepository`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::seed::{DirectorySeed, SeedError};
use crate::domain::ports::{DirectoryRepository, DirectoryRepositoryError};
use crate::domain::{Review, Swap, SwapId, SwapStatus, User, UserId};

#[derive(Debug, Default)]
struct Snapshot {
    users: Vec<User>,
    swaps: Vec<Swap>,
    reviews: Vec<Review>,
}

/// Directory store held in process memory.
///
/// Swap writes compare the stored status with the caller's expected status
/// under the write lock, so two transitions computed from the same snapshot
/// cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    snapshot: RwLock<Snapshot>,
}

fn poisoned<T>(_: PoisonError<T>) -> DirectoryRepositoryError {
    DirectoryRepositoryError::connection("directory lock poisoned")
}

impl InMemoryDirectory {
    /// Build a store from a validated seed.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when the seed has duplicate ids or dangling
    /// user references.
    pub fn from_seed(seed: DirectorySeed) -> Result<Self, SeedError> {
        seed.validate()?;
        Ok(Self {
            snapshot: RwLock::new(Snapshot {
                users: seed.users,
                swaps: seed.swaps,
                reviews: seed.reviews,
            }),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot>, DirectoryRepositoryError> {
        self.snapshot.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot>, DirectoryRepositoryError> {
        self.snapshot.write().map_err(poisoned)
    }
}

fn check_status(
    stored: &Swap,
    expected_status: SwapStatus,
) -> Result<(), DirectoryRepositoryError> {
    if stored.status() == expected_status {
        Ok(())
    } else {
        Err(DirectoryRepositoryError::conflict(format!(
            "swap {} is {}, expected {}",
            stored.id(),
            stored.status(),
            expected_status
        )))
    }
}

fn swap_not_found(id: &SwapId) -> DirectoryRepositoryError {
    DirectoryRepositoryError::not_found(format!("swap {id} not found"))
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectory {
    async fn user(&self, id: &UserId) -> Result<Option<User>, DirectoryRepositoryError> {
        Ok(self.read()?.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn users(&self) -> Result<Vec<User>, DirectoryRepositoryError> {
        Ok(self.read()?.users.clone())
    }

    async fn swaps_for_user(&self, id: &UserId) -> Result<Vec<Swap>, DirectoryRepositoryError> {
        Ok(self
            .read()?
            .swaps
            .iter()
            .filter(|swap| swap.involves(id))
            .cloned()
            .collect())
    }

    async fn reviews_for_user(
        &self,
        id: &UserId,
    ) -> Result<Vec<Review>, DirectoryRepositoryError> {
        Ok(self
            .read()?
            .reviews
            .iter()
            .filter(|review| review.target_user_id() == id)
            .cloned()
            .collect())
    }

    async fn save_user(&self, user: &User) -> Result<(), DirectoryRepositoryError> {
        let mut snapshot = self.write()?;
        let slot = snapshot
            .users
            .iter_mut()
            .find(|stored| stored.id() == user.id())
            .ok_or_else(|| {
                DirectoryRepositoryError::not_found(format!("user {} not found", user.id()))
            })?;
        *slot = user.clone();
        Ok(())
    }

    async fn insert_swap(&self, swap: &Swap) -> Result<(), DirectoryRepositoryError> {
        let mut snapshot = self.write()?;
        if snapshot.swaps.iter().any(|stored| stored.id() == swap.id()) {
            return Err(DirectoryRepositoryError::conflict(format!(
                "swap {} already exists",
                swap.id()
            )));
        }
        snapshot.swaps.push(swap.clone());
        Ok(())
    }

    async fn save_swap(
        &self,
        swap: &Swap,
        expected_status: SwapStatus,
    ) -> Result<(), DirectoryRepositoryError> {
        let mut snapshot = self.write()?;
        let slot = snapshot
            .swaps
            .iter_mut()
            .find(|stored| stored.id() == swap.id())
            .ok_or_else(|| swap_not_found(&swap.id()))?;
        check_status(slot, expected_status)?;
        *slot = swap.clone();
        Ok(())
    }

    async fn remove_swap(
        &self,
        id: &SwapId,
        expected_status: SwapStatus,
    ) -> Result<(), DirectoryRepositoryError> {
        let mut snapshot = self.write()?;
        let stored = snapshot
            .swaps
            .iter()
            .find(|stored| stored.id() == *id)
            .ok_or_else(|| swap_not_found(id))?;
        check_status(stored, expected_status)?;
        snapshot.swaps.retain(|stored| stored.id() != *id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SwapDecision;
    use crate::test_support::{fixed_now, sample_swap, sample_user};
    use rstest::{fixture, rstest};

    struct Seeded {
        store: InMemoryDirectory,
        asha: User,
        vikram: User,
        pending: Swap,
    }

    #[fixture]
    fn seeded() -> Seeded {
        let asha = sample_user("Asha", &["Yoga"], &[]);
        let vikram = sample_user("Vikram", &["Piano"], &[]);
        let meera = sample_user("Meera", &[], &[]);
        let pending = sample_swap(asha.id(), vikram.id(), SwapStatus::Pending);
        let unrelated = sample_swap(vikram.id(), meera.id(), SwapStatus::Accepted);
        let store = InMemoryDirectory::from_seed(DirectorySeed {
            users: vec![asha.clone(), vikram.clone(), meera],
            swaps: vec![pending.clone(), unrelated],
            reviews: Vec::new(),
        })
        .expect("valid seed");
        Seeded {
            store,
            asha,
            vikram,
            pending,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn swaps_for_user_only_returns_involved_swaps(seeded: Seeded) {
        let swaps = seeded
            .store
            .swaps_for_user(seeded.asha.id())
            .await
            .expect("swaps");
        assert_eq!(swaps, vec![seeded.pending]);
    }

    #[rstest]
    #[tokio::test]
    async fn save_swap_applies_when_status_matches(seeded: Seeded) {
        let accepted = seeded
            .pending
            .respond(SwapDecision::Accepted, seeded.vikram.id(), fixed_now())
            .expect("accept");

        seeded
            .store
            .save_swap(&accepted, SwapStatus::Pending)
            .await
            .expect("save succeeds");

        let swaps = seeded
            .store
            .swaps_for_user(seeded.asha.id())
            .await
            .expect("swaps");
        assert_eq!(swaps[0].status(), SwapStatus::Accepted);
    }

    #[rstest]
    #[tokio::test]
    async fn second_transition_from_same_snapshot_conflicts(seeded: Seeded) {
        let accepted = seeded
            .pending
            .respond(SwapDecision::Accepted, seeded.vikram.id(), fixed_now())
            .expect("accept");
        let rejected = seeded
            .pending
            .respond(SwapDecision::Rejected, seeded.vikram.id(), fixed_now())
            .expect("reject");

        seeded
            .store
            .save_swap(&accepted, SwapStatus::Pending)
            .await
            .expect("first write wins");
        let error = seeded
            .store
            .save_swap(&rejected, SwapStatus::Pending)
            .await
            .expect_err("stale write");

        assert!(matches!(error, DirectoryRepositoryError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_swap_checks_status(seeded: Seeded) {
        let id = seeded.pending.id();
        let error = seeded
            .store
            .remove_swap(&id, SwapStatus::Accepted)
            .await
            .expect_err("wrong status");
        assert!(matches!(error, DirectoryRepositoryError::Conflict { .. }));

        seeded
            .store
            .remove_swap(&id, SwapStatus::Pending)
            .await
            .expect("removal succeeds");
        let error = seeded
            .store
            .remove_swap(&id, SwapStatus::Pending)
            .await
            .expect_err("already removed");
        assert!(matches!(error, DirectoryRepositoryError::NotFound { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn insert_swap_rejects_duplicate_ids(seeded: Seeded) {
        let error = seeded
            .store
            .insert_swap(&seeded.pending)
            .await
            .expect_err("duplicate");
        assert!(matches!(error, DirectoryRepositoryError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn save_user_requires_existing_record(seeded: Seeded) {
        let stranger = sample_user("Stranger", &[], &[]);
        let error = seeded
            .store
            .save_user(&stranger)
            .await
            .expect_err("unknown user");
        assert!(matches!(error, DirectoryRepositoryError::NotFound { .. }));
        seeded
            .store
            .save_user(&seeded.asha)
            .await
            .expect("existing user saves");
    }

    #[test]
    fn from_seed_rejects_dangling_references() {
        let asha = sample_user("Asha", &[], &[]);
        let ghost = sample_user("Ghost", &[], &[]);
        let result = InMemoryDirectory::from_seed(DirectorySeed {
            users: vec![asha.clone()],
            swaps: vec![sample_swap(asha.id(), ghost.id(), SwapStatus::Pending)],
            reviews: Vec::new(),
        });
        assert!(matches!(result, Err(SeedError::UnknownUser { .. })));
    }
}
