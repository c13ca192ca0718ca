//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`DirectoryRepository`], [`SkillSuggestionSource`]) are
//! implemented by outbound adapters and expose typed errors. Driving ports
//! are implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_query;
mod directory_repository;
mod skill_suggestion_query;
mod skill_suggestion_source;
mod swap_ports;
mod user_profile;

pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
pub use directory_repository::{DirectoryRepository, DirectoryRepositoryError};
pub use skill_suggestion_query::SkillSuggestionQuery;
#[cfg(test)]
pub use skill_suggestion_source::MockSkillSuggestionSource;
pub use skill_suggestion_source::{
    FixtureSkillSuggestionSource, SkillSuggestionSource, SkillSuggestionSourceError,
    UnconfiguredSkillSuggestionSource,
};
pub use swap_ports::{SwapCommand, SwapQuery};
pub use user_profile::{ProfileEdit, UserProfileCommand, UserProfileQuery};
