//! Shared wiring for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use backend::Trace;
use backend::domain::ports::FixtureSkillSuggestionSource;
use backend::domain::{
    DirectoryService, SessionContext, SkillSuggestionService, SwapService, UserId,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::{profile, suggestions, swaps, users};
use backend::outbound::memory::{InMemoryDirectory, load_seed};

/// Priya, the first user in the bundled seed.
pub const PRIYA: &str = "6f1c2a4e-8d3b-4c5a-9e7f-1a2b3c4d5e01";
/// Arjun, who has a pending request to Priya in the bundled seed.
pub const ARJUN: &str = "6f1c2a4e-8d3b-4c5a-9e7f-1a2b3c4d5e02";
/// Meera, who has a pending request from Priya in the bundled seed.
pub const MEERA: &str = "6f1c2a4e-8d3b-4c5a-9e7f-1a2b3c4d5e03";

pub fn bundled_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("directory.json")
}

/// Store loaded from the bundled seed.
pub fn bundled_store() -> Arc<InMemoryDirectory> {
    let seed = load_seed(&bundled_seed_path()).expect("bundled seed loads");
    Arc::new(InMemoryDirectory::from_seed(seed).expect("bundled seed is consistent"))
}

/// HTTP state acting as `acting_user` over `store`.
pub fn state_for(store: Arc<InMemoryDirectory>, acting_user: &str) -> web::Data<HttpState> {
    let clock = Arc::new(mockable::DefaultClock);
    let directory = Arc::new(DirectoryService::new(store.clone(), clock.clone()));
    let swap_service = Arc::new(SwapService::new(store, clock));
    web::Data::new(HttpState::new(
        HttpStatePorts {
            directory: directory.clone(),
            profile: directory.clone(),
            profile_command: directory,
            swaps: swap_service.clone(),
            swap_commands: swap_service,
            suggestions: Arc::new(SkillSuggestionService::new(Arc::new(
                FixtureSkillSuggestionSource,
            ))),
        },
        SessionContext::new(UserId::new(acting_user).expect("valid user id")),
    ))
}

pub fn api_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).service(
        web::scope("/api/v1")
            .service(users::list_users)
            .service(users::get_user)
            .service(profile::get_profile)
            .service(profile::update_profile)
            .service(swaps::list_swaps)
            .service(swaps::request_swap)
            .service(swaps::respond_to_swap)
            .service(swaps::complete_swap)
            .service(swaps::cancel_swap)
            .service(suggestions::suggest_skills),
    )
}
