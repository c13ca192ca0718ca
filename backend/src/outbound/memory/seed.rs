//! Seed file loading and validation.
//!
//! The seed is a JSON document `{ "users": [...], "swaps": [...],
//! "reviews": [...] }` using the camelCase wire format of each entity.
//! Entity invariants are enforced while decoding; cross references are
//! checked by [`DirectorySeed::validate`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Review, Swap, User, UserId};

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySeed {
    /// Directory users, in listing order.
    #[serde(default)]
    pub users: Vec<User>,
    /// Swaps between seeded users.
    #[serde(default)]
    pub swaps: Vec<Swap>,
    /// Reviews between seeded users.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Errors raised while loading or validating a seed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("failed to read seed at {path}: {source}")]
    Read {
        /// Seed path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid seed document.
    #[error("failed to parse seed at {path}: {source}")]
    Parse {
        /// Seed path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Two records share an identifier.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// Record kind.
        kind: &'static str,
        /// Repeated identifier.
        id: String,
    },
    /// A swap or review references a user missing from the seed.
    #[error("{kind} {id} references unknown user {user_id}")]
    UnknownUser {
        /// Record kind.
        kind: &'static str,
        /// Referencing record.
        id: String,
        /// Missing user.
        user_id: UserId,
    },
}

impl DirectorySeed {
    /// Check identifier uniqueness and that every reference resolves.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut user_ids = HashSet::with_capacity(self.users.len());
        for user in &self.users {
            if !user_ids.insert(user.id()) {
                return Err(SeedError::DuplicateId {
                    kind: "user",
                    id: user.id().to_string(),
                });
            }
        }

        let require_user = |kind: &'static str, id: String, user_id: &UserId| {
            if user_ids.contains(user_id) {
                Ok(())
            } else {
                Err(SeedError::UnknownUser {
                    kind,
                    id,
                    user_id: user_id.clone(),
                })
            }
        };

        let mut swap_ids = HashSet::with_capacity(self.swaps.len());
        for swap in &self.swaps {
            if !swap_ids.insert(swap.id()) {
                return Err(SeedError::DuplicateId {
                    kind: "swap",
                    id: swap.id().to_string(),
                });
            }
            require_user("swap", swap.id().to_string(), swap.from_user_id())?;
            require_user("swap", swap.id().to_string(), swap.to_user_id())?;
        }

        let mut review_ids = HashSet::with_capacity(self.reviews.len());
        for review in &self.reviews {
            if !review_ids.insert(review.id()) {
                return Err(SeedError::DuplicateId {
                    kind: "review",
                    id: review.id().to_string(),
                });
            }
            require_user("review", review.id().to_string(), review.author_id())?;
            require_user("review", review.id().to_string(), review.target_user_id())?;
        }
        Ok(())
    }
}

/// Read and validate the seed file at `path`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use backend::outbound::memory::load_seed;
///
/// let seed = load_seed(Path::new("fixtures/directory.json"))?;
/// assert!(!seed.users.is_empty());
/// # Ok::<(), backend::outbound::memory::SeedError>(())
/// ```
pub fn load_seed(path: &Path) -> Result<DirectorySeed, SeedError> {
    let read_error = |source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    let seed: DirectorySeed =
        serde_json::from_slice(&payload).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    seed.validate()?;
    Ok(seed)
}
