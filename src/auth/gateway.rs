//! Registration, login, and request authorization.
//!
//! Every protected operation goes through [`AuthGateway::authorize`] first;
//! the graph and feed queries only ever see an authenticated identity.

use super::password::PasswordHasher;
use super::token::TokenService;
use crate::error::{AppError, AuthError, ValidationError};
use crate::models::{Account, NewAccount, RegisterRequest, SessionClaim, MIN_PASSWORD_LEN};
use crate::storage::{user, Store, StoreError};
use zeroize::Zeroizing;

/// Orchestrates credentials, the account directory, and session tokens.
#[derive(Clone)]
pub struct AuthGateway {
    store: Store,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthGateway {
    pub fn new(store: Store, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Create an account. No token is issued.
    ///
    /// The existence pre-check only gives an early answer; a registration that
    /// loses a race still fails with `UsernameTaken` via the store constraint.
    pub async fn register(&self, req: RegisterRequest) -> Result<Account, AppError> {
        let password = Zeroizing::new(req.password);

        if user::exists(&self.store, &req.username).await? {
            return Err(ValidationError::UsernameTaken.into());
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort.into());
        }

        let hasher = self.hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

        let account = user::create(
            &self.store,
            NewAccount {
                username: req.username,
                password_hash,
                display_name: req.name,
                gender: req.gender,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::DuplicateUsername => AppError::from(ValidationError::UsernameTaken),
            other => AppError::from(other),
        })?;

        tracing::info!(
            action = "user_registered",
            user_id = account.user_id,
            username = %account.username,
            "New user registered"
        );

        Ok(account)
    }

    /// Check credentials and issue a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let account = match user::find_by_username(&self.store, username).await? {
            Some(account) => account,
            None => {
                tracing::warn!(
                    action = "login_failed",
                    username = %username,
                    reason = "unknown_user",
                    "Login rejected"
                );
                return Err(AuthError::InvalidUser.into());
            }
        };

        let hasher = self.hasher.clone();
        let password = Zeroizing::new(password.to_string());
        let digest = account.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?;

        if !valid {
            tracing::warn!(
                action = "login_failed",
                username = %username,
                reason = "bad_password",
                "Login rejected"
            );
            return Err(AuthError::InvalidPassword.into());
        }

        let token = self.tokens.issue(&SessionClaim {
            username: account.username.clone(),
        })?;

        tracing::info!(
            action = "login_success",
            user_id = account.user_id,
            username = %account.username,
            "User logged in"
        );

        Ok(token)
    }

    /// Turn a presented token into an authenticated identity.
    pub fn authorize(&self, token: Option<&str>) -> Result<SessionClaim, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.tokens.verify(token)
    }
}
