//! HTTP server assembly: wires REST endpoints, probes, and OpenAPI docs.

pub mod config;

pub use config::{BIND_ADDR_VAR, ConfigError, ServerConfig};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{error, users};
use crate::middleware::Correlate;

/// Assemble the application with the given store state and health flag.
///
/// Used by [`run`] and by integration tests, so both serve identical
/// routes, extractor configs, and middleware.
pub fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .app_data(error::json_config())
        .app_data(error::path_config())
        .wrap(Correlate)
        .configure(users::configure)
        .service(health::ready)
        .service(health::live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = HttpState::in_memory();
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness flag stays shared.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr())?;

    info!(addr = %config.bind_addr(), "listening");
    health_state.mark_ready();
    server.run().await
}
