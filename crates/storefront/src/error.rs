//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error response has a JSON body of the form
//! `{"message": "...", "code": "..."}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookstore_core::api::{ErrorBody, ErrorCode};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found. Carries the user-facing message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client. Carries the user-facing message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) | RepositoryError::Invalid(_) => {
                    StatusCode::BAD_REQUEST
                }
                RepositoryError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::MissingCredentials
                | AuthError::MissingRegistrationFields
                | AuthError::InvalidEmail(_)
                | AuthError::UserAlreadyExists => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::AuthenticationRequired => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// User-facing body. Internal details are never exposed.
    fn body(&self) -> ErrorBody {
        let (message, code) = match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => ("Not found".to_string(), ErrorCode::NotFound),
                RepositoryError::Invalid(_) => (
                    "Title, author and price are required".to_string(),
                    ErrorCode::MissingFields,
                ),
                RepositoryError::Conflict(msg) => (msg.clone(), ErrorCode::BadRequest),
                RepositoryError::IdsExhausted => {
                    ("Internal server error".to_string(), ErrorCode::Internal)
                }
            },
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => (
                    "Email and password are required".to_string(),
                    ErrorCode::MissingFields,
                ),
                AuthError::MissingRegistrationFields => (
                    "Name, email and password are required".to_string(),
                    ErrorCode::MissingFields,
                ),
                AuthError::InvalidEmail(e) => {
                    (format!("Invalid email address: {e}"), ErrorCode::BadRequest)
                }
                AuthError::InvalidCredentials => (
                    "Invalid email or password".to_string(),
                    ErrorCode::InvalidCredentials,
                ),
                AuthError::UserAlreadyExists => (
                    "User with this email already exists".to_string(),
                    ErrorCode::EmailTaken,
                ),
                AuthError::AuthenticationRequired => (
                    "Authentication required".to_string(),
                    ErrorCode::AuthenticationRequired,
                ),
                AuthError::UserNotFound => ("User not found".to_string(), ErrorCode::NotFound),
                AuthError::Repository(_) => {
                    ("Internal server error".to_string(), ErrorCode::Internal)
                }
            },
            Self::NotFound(msg) => (msg.clone(), ErrorCode::NotFound),
            Self::BadRequest(msg) => (msg.clone(), ErrorCode::BadRequest),
        };

        ErrorBody {
            message,
            code: Some(code),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Book not found".to_string());
        assert_eq!(err.to_string(), "Not found: Book not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AuthError::AuthenticationRequired.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AuthError::UserAlreadyExists.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(RepositoryError::Invalid("title".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AuthError::UserNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(RepositoryError::IdsExhausted.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let body = AppError::from(RepositoryError::IdsExhausted).body();
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.code, Some(ErrorCode::Internal));
    }

    #[test]
    fn test_auth_bodies_carry_codes() {
        let body = AppError::from(AuthError::UserAlreadyExists).body();
        assert_eq!(body.message, "User with this email already exists");
        assert_eq!(body.code, Some(ErrorCode::EmailTaken));

        let body = AppError::from(AuthError::MissingCredentials).body();
        assert_eq!(body.code, Some(ErrorCode::MissingFields));
    }
}
