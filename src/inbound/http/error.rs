//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while Actix handlers
//! turn failures into the conventional `{statusCode, message, error}`
//! envelope. `message` is a single string for not-found and conflict
//! failures and an array of constraint strings for validation failures.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::UserStoreError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by HTTP handlers, carrying its wire status and body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 with one constraint string per failed validation rule.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    /// 404 with the canonical "User not found" body.
    #[error("User not found")]
    UserNotFound,
    /// 409 with the canonical "User already exists" body.
    #[error("User already exists")]
    UserConflict,
}

impl ApiError {
    /// Single-constraint validation failure.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    fn body(&self) -> ErrorBody {
        let status = self.status_code();
        let message = match self {
            Self::Validation(constraints) => json!(constraints),
            Self::UserNotFound => json!("User not found"),
            Self::UserConflict => json!("User already exists"),
        };
        ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        }
    }
}

/// JSON error envelope serialised onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Numeric HTTP status, mirrored into the body.
    #[schema(example = 404)]
    pub status_code: u16,
    /// Single message or array of constraint strings.
    #[schema(example = "User not found")]
    pub message: Value,
    /// Canonical reason phrase for the status.
    #[schema(example = "Not Found")]
    pub error: String,
}

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::NotFound { .. } => Self::UserNotFound,
            UserStoreError::EmailInUse { .. } | UserStoreError::IdInUse { .. } => {
                Self::UserConflict
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserConflict => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// JSON extractor configuration rejecting malformed bodies in the standard
/// envelope. Covers syntax errors and unknown fields alike.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration rejecting non-integer ids in the standard
/// envelope.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(err.to_string()).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(err.to_string()).into()
}
