//! Test helpers for inbound HTTP components.
//!
//! Handlers are exercised against the real services over an in-memory
//! directory, so status mapping is checked end to end.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::TimeDelta;
use rstest::fixture;
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{FixtureSkillSuggestionSource, SkillSuggestionSource};
use crate::domain::{
    DirectoryService, Review, ReviewDraft, ReviewId, ReviewRating, SessionContext,
    SkillSuggestionService, Swap, SwapService, SwapStatus, User,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{profile, suggestions, swaps, users};
use crate::outbound::memory::{DirectorySeed, InMemoryDirectory};
use crate::test_support::{MutableClock, fixed_now, sample_swap, sample_user};

/// Three users acting as Alice, with one swap in each direction.
pub struct TestDirectory {
    pub alice: User,
    pub bob: User,
    pub carol: User,
    /// Pending, from Bob to Alice.
    pub incoming: Swap,
    /// Accepted, from Alice to Carol.
    pub accepted: Swap,
    pub store: Arc<InMemoryDirectory>,
}

#[fixture]
pub fn test_directory() -> TestDirectory {
    let alice = sample_user("Alice Rao", &["Guitar", "Cooking"], &["Spanish"]);
    let bob = sample_user("Bob Mehta", &["Spanish"], &["Cooking"]);
    let carol = sample_user("Carol Iyer", &["Photography"], &["Guitar"]);
    let incoming = sample_swap(bob.id(), alice.id(), SwapStatus::Pending);
    let accepted = sample_swap(alice.id(), carol.id(), SwapStatus::Accepted);
    let review = Review::new(ReviewDraft {
        id: ReviewId::random(),
        author_id: carol.id().clone(),
        target_user_id: alice.id().clone(),
        rating: ReviewRating::new(5).expect("valid stars"),
        comment: "Patient teacher".to_owned(),
        created_at: fixed_now() - TimeDelta::days(1),
    })
    .expect("valid review");

    let store = InMemoryDirectory::from_seed(DirectorySeed {
        users: vec![alice.clone(), bob.clone(), carol.clone()],
        swaps: vec![incoming.clone(), accepted.clone()],
        reviews: vec![review],
    })
    .expect("valid seed");

    TestDirectory {
        alice,
        bob,
        carol,
        incoming,
        accepted,
        store: Arc::new(store),
    }
}

/// Build state acting as Alice with the given suggestion source.
pub fn test_state_with_source(
    directory: &TestDirectory,
    source: Arc<dyn SkillSuggestionSource>,
) -> web::Data<HttpState> {
    let clock = Arc::new(MutableClock::new(fixed_now()));
    let directory_service = Arc::new(DirectoryService::new(directory.store.clone(), clock.clone()));
    let swap_service = Arc::new(SwapService::new(directory.store.clone(), clock));
    let suggestion_service = Arc::new(SkillSuggestionService::new(source));

    web::Data::new(HttpState::new(
        HttpStatePorts {
            directory: directory_service.clone(),
            profile: directory_service.clone(),
            profile_command: directory_service,
            swaps: swap_service.clone(),
            swap_commands: swap_service,
            suggestions: suggestion_service,
        },
        SessionContext::new(directory.alice.id().clone()),
    ))
}

pub fn app_with_state(
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

/// App acting as Alice with the canned suggestion source.
pub fn test_app(
    directory: &TestDirectory,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    app_with_state(test_state_with_source(
        directory,
        Arc::new(FixtureSkillSuggestionSource),
    ))
}

/// Call `app` and decode the body as JSON; empty bodies decode to `null`.
pub async fn call_json<S, R, B>(app: &S, request: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, body)
}
