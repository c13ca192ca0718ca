//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::SessionContext;
use crate::domain::ports::{
    DirectoryQuery, SkillSuggestionQuery, SwapCommand, SwapQuery, UserProfileCommand,
    UserProfileQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub directory: Arc<dyn DirectoryQuery>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
    pub swaps: Arc<dyn SwapQuery>,
    pub swap_commands: Arc<dyn SwapCommand>,
    pub suggestions: Arc<dyn SkillSuggestionQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn DirectoryQuery>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
    pub swaps: Arc<dyn SwapQuery>,
    pub swap_commands: Arc<dyn SwapCommand>,
    pub suggestions: Arc<dyn SkillSuggestionQuery>,
    /// Acting user for every request served by this process.
    pub session: SessionContext,
}

impl HttpState {
    /// Construct state from port implementations and the acting user.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureSkillSuggestionSource;
    /// use backend::domain::{
    ///     DirectoryService, SessionContext, SkillSuggestionService, SwapService, UserId,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::{DirectorySeed, InMemoryDirectory};
    ///
    /// let store = Arc::new(
    ///     InMemoryDirectory::from_seed(DirectorySeed::default()).expect("empty seed is valid"),
    /// );
    /// let clock = Arc::new(mockable::DefaultClock);
    /// let directory = Arc::new(DirectoryService::new(store.clone(), clock.clone()));
    /// let swaps = Arc::new(SwapService::new(store, clock));
    /// let suggestions = Arc::new(SkillSuggestionService::new(Arc::new(
    ///     FixtureSkillSuggestionSource,
    /// )));
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         directory: directory.clone(),
    ///         profile: directory.clone(),
    ///         profile_command: directory,
    ///         swaps: swaps.clone(),
    ///         swap_commands: swaps,
    ///         suggestions,
    ///     },
    ///     SessionContext::new(UserId::random()),
    /// );
    /// let _data = actix_web::web::Data::new(state);
    /// ```
    pub fn new(ports: HttpStatePorts, session: SessionContext) -> Self {
        let HttpStatePorts {
            directory,
            profile,
            profile_command,
            swaps,
            swap_commands,
            suggestions,
        } = ports;
        Self {
            directory,
            profile,
            profile_command,
            swaps,
            swap_commands,
            suggestions,
            session,
        }
    }
}
