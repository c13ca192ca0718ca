//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::profile::{get_profile, update_profile};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::suggestions::suggest_skills;
use backend::inbound::http::swaps::{
    cancel_swap, complete_swap, list_swaps, request_swap, respond_to_swap,
};
use backend::inbound::http::users::{get_user, list_users};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) settings: ServerSettings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(settings: ServerSettings) -> Self {
        Self { settings }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_users)
        .service(get_user)
        .service(get_profile)
        .service(update_profile)
        .service(list_swaps)
        .service(request_swap)
        .service(respond_to_swap)
        .service(complete_swap)
        .service(cancel_swap)
        .service(suggest_skills);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the seed or settings are invalid, or
/// when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let bind_addr = config
        .settings
        .bind_addr()
        .map_err(std::io::Error::other)?;
    let http_state = build_http_state(&config)?;
    let server_health_state = health_state.clone();

    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .bind(bind_addr)?
            .run();

    health_state.mark_ready();
    tracing::info!(%bind_addr, "server listening");
    Ok(server)
}
