//! Flock application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Open the SQLite store (schema applied on open)
//! 3. Build the auth gateway (hasher + token service)
//! 4. Build router with API routes and security headers
//! 5. Serve until Ctrl-C, then close the store
//!
//! Also supports a `secret` subcommand for generating a TOKEN_SECRET.

use base64::{engine::general_purpose, Engine as _};
use flock::{
    auth::{AppState, AuthGateway, PasswordHasher, TokenService},
    config::{Config, MIN_SECRET_BYTES},
    routes,
    storage::Store,
};
use rand::Rng;
use zeroize::Zeroize;

/// Generate a random token secret, base64-encoded.
fn generate_secret() -> String {
    let mut bytes = [0u8; MIN_SECRET_BYTES];
    rand::rng().fill(&mut bytes);
    let encoded = general_purpose::STANDARD.encode(bytes);
    bytes.zeroize();
    encoded
}

fn print_secret_usage() {
    eprintln!("Usage: flock secret");
    eprintln!();
    eprintln!("Generate a random base64 secret for TOKEN_SECRET.");
    eprintln!();
    eprintln!("Then set in .env:");
    eprintln!("  TOKEN_SECRET=<output>");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // Check for secret subcommand
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "secret" {
        if args.len() != 2 {
            print_secret_usage();
            std::process::exit(1);
        }
        println!("{}", generate_secret());
        return;
    }

    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("Failed to load config");
    tracing::info!(?config, "Starting flock on {}", config.bind_addr);

    let store = Store::open(&config.database_path).expect("Failed to open database");
    tracing::info!(path = %config.database_path.display(), "Database ready");

    let hasher = PasswordHasher::new(config.hash_memory_kib, config.hash_iterations)
        .expect("Invalid password hashing parameters");
    let tokens = TokenService::new(&config.token_secret, config.token_ttl());

    let state = AppState {
        store: store.clone(),
        gateway: AuthGateway::new(store.clone(), hasher, tokens),
    };

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // The router (and its store clones) is dropped once serve returns
    if let Err(e) = store.close() {
        tracing::error!(error = %e, "Failed to close database");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secret_is_valid() {
        let secret = generate_secret();
        let decoded = general_purpose::STANDARD.decode(&secret).unwrap();
        assert_eq!(decoded.len(), MIN_SECRET_BYTES);
    }

    #[test]
    fn test_generated_secrets_are_unique() {
        assert_ne!(generate_secret(), generate_secret());
    }
}
