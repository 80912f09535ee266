//! Error types and Axum response conversions.

use crate::storage::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Input rejected before touching credentials. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("User already exists")]
    UsernameTaken,

    #[error("Password is too short")]
    PasswordTooShort,

    #[error("Invalid tweet: {0}")]
    InvalidPost(String),
}

/// Credential or token rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid user")]
    InvalidUser,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Missing JWT Token")]
    MissingToken,

    #[error("Invalid JWT Token")]
    InvalidToken,
}

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Auth(e @ (AuthError::InvalidUser | AuthError::InvalidPassword)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Auth(e @ (AuthError::MissingToken | AuthError::InvalidToken)) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            AppError::Store(_) | AppError::Internal(_) => {
                // Log detailed error server-side, return generic message to client
                tracing::error!(error = %self, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
