//! Authentication route handlers.
//!
//! Credentials are plain JSON; the response to a successful login carries
//! the marker the client presents as a bearer token from then on.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use bookstore_core::api::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserMessage, UserResponse,
};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalBearer, RequireBearer};
use crate::state::AppState;

/// Check credentials and issue a marker.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;

    let (user, token) = state.auth().login(&request.email, &request.password).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
        token,
    }))
}

/// Create an account. The caller still has to log in.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserMessage>)> {
    let Json(request) = payload?;

    let user = state
        .auth()
        .register(&request.name, &request.email, &request.password)
        .await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserMessage {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Forget the presented marker, if any. Always succeeds.
pub async fn logout(
    State(state): State<AppState>,
    OptionalBearer(token): OptionalBearer,
) -> Json<MessageResponse> {
    state.auth().logout(token.as_deref()).await;
    clear_sentry_user();

    Json(MessageResponse {
        message: "Logout successful".to_string(),
    })
}

/// The account the presented marker was issued to.
pub async fn current_user(
    State(state): State<AppState>,
    RequireBearer(token): RequireBearer,
) -> Result<Json<UserResponse>> {
    let user = state.auth().current_user(&token).await?;
    Ok(Json(UserResponse { user }))
}
