//! Auth API endpoints.

use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use axum::{extract::State, response::IntoResponse, Json};

/// POST /register: Create an account
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.gateway.register(req).await?;
    Ok(Json(MessageResponse::ok("User created successfully")))
}

/// POST /login: Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let jwt_token = state.gateway.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse { jwt_token }))
}
