//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::{ChangePasswordRequest, LoginRequest, RegisterRequest, UserResponse};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Login response: the user plus a bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Signed access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    #[schema(example = 10800)]
    pub expires_in: i64,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/change-password", post(change_password))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Email format or password rule violated"),
        (status = 409, description = "Email has already been used")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.register(payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email format invalid"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "Email is not registered")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = state.user_service.login(payload).await?;
    let expires_in = (outcome.token.expires_at - Utc::now()).num_seconds().max(0);

    Ok(Json(LoginResponse {
        user: UserResponse::from(outcome.user),
        access_token: outcome.token.token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in,
    }))
}

/// Change the password of a registered email
#[utoipa::path(
    post,
    path = "/auth/change-password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Email format or password rule violated"),
        (status = 404, description = "Email is not registered")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.change_password(payload).await?;

    Ok(Json(MessageResponse::new("Password changed")))
}
