use base64::{engine::general_purpose, Engine as _};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use zeroize::Zeroizing;

/// Minimum decoded length of `TOKEN_SECRET`, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Clone)]
pub struct Config {
    // Session tokens
    pub token_secret: Zeroizing<Vec<u8>>,
    pub token_ttl_secs: u64,

    // Storage
    pub database_path: PathBuf,

    // Server
    pub bind_addr: SocketAddr,

    // Password hashing cost
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("database_path", &self.database_path)
            .field("bind_addr", &self.bind_addr)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        let _ = dotenvy::dotenv();

        let token_secret_b64 = Zeroizing::new(
            env::var("TOKEN_SECRET")
                .map_err(|_| ConfigError::MissingVar("TOKEN_SECRET".to_string()))?,
        );
        let token_secret = Zeroizing::new(
            general_purpose::STANDARD
                .decode(token_secret_b64.as_bytes())
                .map_err(|e| {
                    ConfigError::InvalidValue(
                        "TOKEN_SECRET".to_string(),
                        format!("invalid base64: {}", e),
                    )
                })?,
        );
        if token_secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::InvalidValue(
                "TOKEN_SECRET".to_string(),
                format!(
                    "expected at least {} bytes, got {}",
                    MIN_SECRET_BYTES,
                    token_secret.len()
                ),
            ));
        }

        let token_ttl_secs = parse_env_or_default("TOKEN_TTL_SECS", 86_400)?;

        let database_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "flock.db".to_string());
        if database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "DATABASE_PATH".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let hash_memory_kib = parse_env_or_default("HASH_MEMORY_KIB", 19_456)?;
        let hash_iterations = parse_env_or_default("HASH_ITERATIONS", 2)?;

        Ok(Config {
            token_secret,
            token_ttl_secs,
            database_path: PathBuf::from(database_path),
            bind_addr,
            hash_memory_kib,
            hash_iterations,
        })
    }

    /// Token lifetime; `None` when expiry is disabled (`TOKEN_TTL_SECS=0`).
    pub fn token_ttl(&self) -> Option<Duration> {
        (self.token_ttl_secs > 0).then(|| Duration::from_secs(self.token_ttl_secs))
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
