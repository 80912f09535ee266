//! Axum extractors for authentication.

use crate::auth::gateway::AuthGateway;
use crate::error::{AppError, AuthError};
use crate::models::Account;
use crate::storage::{self, Store};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub gateway: AuthGateway,
}

/// Authenticated session extractor.
///
/// Extracts the token from `Authorization: Bearer {token}`, verifies it, and
/// resolves the claimed username to its account.
/// Returns 401 Unauthorized if the token is missing or invalid.
pub struct AuthSession {
    pub account: Account,
}

/// Pull the bearer token out of the request headers, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claim = state
            .gateway
            .authorize(bearer_token(parts))
            .inspect_err(|e| {
                tracing::debug!(
                    action = "auth_rejected",
                    reason = %e,
                    path = %parts.uri.path(),
                    "Request rejected"
                );
            })?;

        // A validly signed token for an account that does not exist is not a session
        let account = storage::user::find_by_username(&state.store, &claim.username)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthSession { account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/user/tweets/feed");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_present() {
        let parts = parts(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&parts(None)), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        assert_eq!(bearer_token(&parts(Some("Basic dXNlcjpwYXNz"))), None);
    }

    #[test]
    fn test_bearer_token_empty() {
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer    "))), None);
    }
}
