//! Bearer marker extractors.
//!
//! The storefront checks marker presence only. Resolving a marker to an
//! account is the handler's business (see `GET /api/auth/user`); catalog
//! mutations accept any non-empty marker and never consult roles.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use bookstore_core::api::{ErrorBody, ErrorCode};

/// Extractor that requires a non-empty bearer marker.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireBearer(token): RequireBearer,
/// ) -> impl IntoResponse {
///     format!("presented {} bytes", token.len())
/// }
/// ```
pub struct RequireBearer(pub String);

/// Error returned when a marker is required but absent.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization` header, or an empty one.
    MissingToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    message: "Authentication required".to_string(),
                    code: Some(ErrorCode::AuthenticationRequired),
                }),
            )
                .into_response(),
        }
    }
}

/// Pull the marker out of the `Authorization` header.
///
/// A `Bearer ` prefix is stripped if present. Blank values count as absent.
fn bearer_token(parts: &Parts) -> Option<String> {
    let raw = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl<S> FromRequestParts<S> for RequireBearer
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .map(Self)
            .ok_or(AuthRejection::MissingToken)
    }
}

/// Extractor that optionally gets the bearer marker.
///
/// Unlike `RequireBearer`, this does not reject the request if no marker is
/// presented.
pub struct OptionalBearer(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalBearer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts)))
    }
}
