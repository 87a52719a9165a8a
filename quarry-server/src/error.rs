//! Server error types with HTTP status code mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quarry_registry::RegistryError;
use serde::Serialize;
use thiserror::Error;

/// Server error type that wraps registry errors and provides HTTP status
/// mapping
#[derive(Error, Debug)]
pub enum ServerError {
    /// Registry layer error
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not Found (404)
    #[error("{0}")]
    NotFound(String),
}

impl ServerError {
    /// Map error to a short machine-readable code, recorded on request spans
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Registry(RegistryError::IndexAlreadyExists(_)) => "error:AlreadyExists",
            ServerError::Registry(RegistryError::IndexNotFound(_)) => "error:NotFound",
            ServerError::Registry(RegistryError::NameConflict(_)) => "error:NameConflict",
            ServerError::Registry(RegistryError::AliasNotFound(_)) => "error:NotFound",
            ServerError::Registry(RegistryError::InvalidName { .. }) => "error:InvalidName",
            ServerError::Json(_) => "error:BadRequest",
            ServerError::BadRequest(_) => "error:BadRequest",
            ServerError::NotFound(_) => "error:NotFound",
        }
    }

    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 409 - Conflict
            ServerError::Registry(RegistryError::IndexAlreadyExists(_)) => StatusCode::CONFLICT,

            // 404 - Not Found
            ServerError::Registry(RegistryError::IndexNotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Registry(RegistryError::AliasNotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,

            // 400 - Bad Request (client errors)
            ServerError::Registry(RegistryError::NameConflict(_)) => StatusCode::BAD_REQUEST,
            ServerError::Registry(RegistryError::InvalidName { .. }) => StatusCode::BAD_REQUEST,
            ServerError::Json(_) => StatusCode::BAD_REQUEST,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServerError::BadRequest(msg.into())
    }

    /// Create a not found error (404)
    pub fn not_found(msg: impl Into<String>) -> Self {
        ServerError::NotFound(msg.into())
    }
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub status: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(r#"{{"error":"{}","status":{}}}"#, self, status.as_u16())
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = ServerError::from(RegistryError::index_already_exists("foo"));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = ServerError::from(RegistryError::index_not_found("foo"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ServerError::from(RegistryError::alias_not_found("bar"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ServerError::from(RegistryError::name_conflict("foo"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ServerError::from(RegistryError::invalid_name("a b", "name cannot contain ' '"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(
            ServerError::bad_request("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_error_codes() {
        let err = ServerError::from(RegistryError::index_already_exists("foo"));
        assert_eq!(err.error_code(), "error:AlreadyExists");

        let err = ServerError::from(RegistryError::name_conflict("foo"));
        assert_eq!(err.error_code(), "error:NameConflict");
    }
}
