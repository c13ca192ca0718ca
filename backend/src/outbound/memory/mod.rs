//! In-memory directory adapter seeded from a JSON file.

mod directory;
mod seed;

pub use directory::InMemoryDirectory;
pub use seed::{DirectorySeed, SeedError, load_seed};
