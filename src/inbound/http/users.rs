//! Users API handlers.
//!
//! ```text
//! GET    /users        list all users
//! POST   /users        create a user
//! GET    /users/{id}   fetch one user
//! PATCH  /users/{id}   partially update a user
//! DELETE /users/{id}   remove a user
//! ```
//!
//! Field validation happens here, before the store is invoked; uniqueness
//! and existence checks happen inside the store.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{EmailAddress, NewUser, User, UserId, UserName, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Create request body for `POST /users`.
///
/// Example JSON: `{"name":"Jimmy Dean","email":"jimmy.dean@gmail.com"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Jimmy Dean")]
    pub name: String,
    #[schema(example = "jimmy.dean@gmail.com")]
    pub email: String,
}

/// Patch body for `PATCH /users/{id}`. Unknown fields are rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "James Dean")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "james.dean@gmail.com")]
    pub email: Option<String>,
}

/// Collect every failed constraint so clients see all problems at once,
/// the way validation pipelines conventionally report them.
fn validate_create(body: CreateUserRequest) -> Result<NewUser, ApiError> {
    let mut constraints = Vec::new();
    let name = UserName::new(body.name)
        .map_err(|err| constraints.push(err.to_string()))
        .ok();
    let email = EmailAddress::new(body.email)
        .map_err(|err| constraints.push(err.to_string()))
        .ok();

    match (name, email) {
        (Some(name), Some(email)) => Ok(NewUser::new(name, email)),
        _ => Err(ApiError::Validation(constraints)),
    }
}

fn validate_update(body: UpdateUserRequest) -> Result<UserPatch, ApiError> {
    let mut constraints = Vec::new();
    let mut patch = UserPatch::new();

    if let Some(raw) = body.name {
        match UserName::new(raw) {
            Ok(name) => patch = patch.name(name),
            Err(err) => constraints.push(err.to_string()),
        }
    }
    if let Some(raw) = body.email {
        match EmailAddress::new(raw) {
            Ok(email) => patch = patch.email(email),
            Err(err) => constraints.push(err.to_string()),
        }
    }

    if constraints.is_empty() {
        Ok(patch)
    } else {
        Err(ApiError::Validation(constraints))
    }
}

/// List all live users.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All live users, insertion order", body = [User])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list().await))
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    let user = state.users.get(id).await?;
    Ok(web::Json(user))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user with assigned id", body = User),
        (status = 400, description = "Validation failure", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let input = validate_create(body.into_inner())?;
    let user = state.users.create(input).await?;
    info!(id = %user.id(), "user created");
    Ok(HttpResponse::Created().json(user))
}

/// Partially update a user. Absent fields are left untouched.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Validation failure or unknown field", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    body: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let patch = validate_update(body.into_inner())?;
    state.users.update(id, patch).await?;
    info!(id = %id, "user updated");
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User removed"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    state.users.remove(id).await?;
    info!(id = %id, "user removed");
    Ok(HttpResponse::NoContent().finish())
}

/// Register every user endpoint on a service config.
///
/// Shared between the server assembly and test harnesses so both expose
/// the same routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

#[cfg(test)]
mod tests;
