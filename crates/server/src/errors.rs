use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Fixed body text for internal failures; details only go to the log.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please contact the Administrator";

/// JSON error response: `{"error": <title>, "detail": <optional message>}`.
#[derive(Debug, Clone)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad request").with_detail(detail)
    }

    pub fn unauthorized() -> Self { Self::new(StatusCode::UNAUTHORIZED, "unauthorized") }

    pub fn forbidden() -> Self { Self::new(StatusCode::FORBIDDEN, "forbidden") }

    pub fn internal() -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.error, detail: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => {
                warn!(detail = %msg, "rejected invalid input");
                Self::bad_request(msg)
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "not found").with_detail(msg),
            ServiceError::Conflict(msg) => {
                warn!(detail = %msg, "conflicting write");
                Self::new(StatusCode::CONFLICT, "conflict")
            }
            ServiceError::Db(msg) => {
                error!(error = %msg, "database failure");
                Self::internal()
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => {
                warn!(code = 1001, detail = %msg, "rejected invalid input");
                Self::bad_request(msg)
            }
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "conflict").with_detail("user already exists"),
            AuthError::Unauthorized => Self::unauthorized(),
            other => {
                error!(code = other.code(), error = %other, "auth failure");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e, "rejected request body");
        Self::bad_request(e.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self {
        warn!(error = %e, "rejected path parameter");
        Self::bad_request(e.body_text())
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self {
        warn!(error = %e, "rejected query string");
        Self::bad_request(e.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("seeding failed: {0}")]
    Seed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(JsonApiError::from(ServiceError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(ServiceError::NotFound("x".into())).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(ServiceError::Conflict("x".into())).status, StatusCode::CONFLICT);
        let internal = JsonApiError::from(ServiceError::Db("relation \"book\" does not exist".into()));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.error, GENERIC_FAILURE);
        assert!(internal.detail.is_none());
    }

    #[test]
    fn auth_internals_are_not_echoed() {
        let e = JsonApiError::from(AuthError::Unavailable("connection refused".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.detail.is_none());
        assert_eq!(JsonApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
    }
}
