//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers the user endpoints, the health probes, and the schemas they
//! reference. Swagger UI serves the document in debug builds under `/docs`.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "In-memory user management over a conventional REST surface."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::user::User,
        crate::inbound::http::users::CreateUserRequest,
        crate::inbound::http::users::UpdateUserRequest,
        crate::inbound::http::error::ErrorBody,
    )),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;
