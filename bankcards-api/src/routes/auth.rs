//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::ApiError;
use crate::models::dto::{JwtAuthResponse, LoginRequest, RegisterRequest, RegisterResponse};
use crate::state::AppState;

/// Handler for `POST /api/auth/register`: creates a user with role USER.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;
    let message = state
        .auth_service
        .register(
            &request.username,
            &request.password,
            &request.first_name,
            &request.last_name,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { message })))
}

/// Handler for `POST /api/auth/login`: verifies credentials and returns a
/// bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<JwtAuthResponse>, ApiError> {
    let response = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(response))
}
