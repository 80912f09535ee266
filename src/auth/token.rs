//! Signed session tokens (HS256 JWT).
//!
//! Tokens carry the username and an issue time. They are signed, not
//! encrypted; the server keeps no session state.

use crate::error::{AppError, AuthError};
use crate::models::{unix_now, SessionClaim};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    username: String,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Issues and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenService {
    /// Build a service around `secret`. `ttl` of `None` issues non-expiring tokens.
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        if ttl.is_none() {
            validation.required_spec_claims.clear();
            validation.validate_exp = false;
        }

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a token for `claim`.
    pub fn issue(&self, claim: &SessionClaim) -> Result<String, AppError> {
        self.issue_at(claim, unix_now())
    }

    fn issue_at(&self, claim: &SessionClaim, now: i64) -> Result<String, AppError> {
        let claims = TokenClaims {
            username: claim.username.clone(),
            iat: now,
            exp: self
                .ttl
                .map(|ttl| now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Check a token's signature (and expiry, when enabled) and return its claim.
    pub fn verify(&self, token: &str) -> Result<SessionClaim, AuthError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| SessionClaim {
                username: data.claims.username,
            })
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }
}
