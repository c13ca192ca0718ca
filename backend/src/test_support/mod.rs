//! Shared test doubles and builders for unit tests.

mod clock;
mod directory;

pub use clock::MutableClock;
pub use directory::{fixed_now, sample_swap, sample_user};
