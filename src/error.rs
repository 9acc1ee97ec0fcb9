use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Typed failures returned by the store and service layers. Handlers translate
/// these into an [`ApiError`] with a fixed message; driver error text never
/// reaches a response body.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("required fields missing: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("email already taken")]
    DuplicateEmail,
    #[error("already registered for event")]
    DuplicateRegistration,
    #[error("referenced row does not exist")]
    ForeignKeyViolation,
    #[error("event not found")]
    EventNotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

// Postgres constraint-violation SQLSTATE codes.
const UNIQUE_VIOLATION: &str = "23505";
const FK_VIOLATION: &str = "23503";

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .as_deref()
        == Some(UNIQUE_VIOLATION)
}

pub(crate) fn is_fk_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .as_deref()
        == Some(FK_VIOLATION)
}

/// HTTP-facing error: status plus a fixed human-readable message, serialized
/// as `{"error": ...}` (validation failures also carry the offending fields).
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(Vec<String>),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }
    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(fields) => ErrorBody {
                error: "Invalid request data".into(),
                fields: Some(fields),
            },
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => ErrorBody {
                error: msg,
                fields: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_status_mapping() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation(vec!["name".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorBody {
            error: "Event not found".into(),
            fields: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Event not found"}"#);
    }

    #[test]
    fn validation_body_lists_fields() {
        let body = ErrorBody {
            error: "Invalid request data".into(),
            fields: Some(vec!["name".into(), "location".into()]),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""fields":["name","location"]"#));
    }
}
