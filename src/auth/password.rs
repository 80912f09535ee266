//! Argon2id password hashing.

use crate::error::AppError;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version};
use argon2::{PasswordHasher as _, PasswordVerifier as _};
use rand::Rng;

/// Salted, cost-fixed password hashing.
///
/// Digests are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so the
/// salt and cost travel with the digest and verification needs nothing else.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    /// OWASP-recommended cost: m=19456 KiB, t=2, p=1.
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher {
    /// Build a hasher with an explicit memory cost (KiB) and iteration count.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let mut bytes = [0u8; 16];
        rand::rng().fill(&mut bytes);
        let salt = SaltString::encode_b64(&bytes)
            .map_err(|e| AppError::Internal(format!("Argon2 salt: {}", e)))?;

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Argon2 hash: {}", e)))
    }

    /// Check a password against a stored digest.
    ///
    /// Uses the salt and cost embedded in the digest; the final comparison is
    /// constant-time. A malformed digest verifies as false.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        PasswordHash::new(digest)
            .map(|hash| {
                self.argon2()
                    .verify_password(plaintext.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Low-cost hasher so the suite stays fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(1024, 1).unwrap()
    }

    #[test]
    fn test_verify_roundtrip() {
        let hasher = hasher();
        let digest = hasher.hash("secret1").unwrap();
        assert!(hasher.verify("secret1", &digest));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hasher = hasher();
        let digest = hasher.hash("secret1").unwrap();
        assert!(!hasher.verify("secret2", &digest));
        assert!(!hasher.verify("Secret1", &digest));
        assert!(!hasher.verify("", &digest));
    }

    #[test]
    fn test_salted_digests_differ() {
        let hasher = hasher();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_digest_is_phc_and_hides_plaintext() {
        let digest = hasher().hash("secret1").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(!digest.contains("secret1"));
    }

    #[test]
    fn test_malformed_digest_is_false() {
        let hasher = hasher();
        assert!(!hasher.verify("secret1", "not a digest"));
        assert!(!hasher.verify("secret1", ""));
    }

    #[test]
    fn test_verify_uses_embedded_cost() {
        // A digest produced at one cost still verifies with a hasher built at another.
        let digest = PasswordHasher::new(2048, 2)
            .unwrap()
            .hash("secret1")
            .unwrap();
        assert!(hasher().verify("secret1", &digest));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(matches!(
            PasswordHasher::new(0, 0),
            Err(AppError::Internal(_))
        ));
    }
}
