//! Authentication layer: password hashing, session tokens, and the gateway
//! that sits in front of every protected operation.

pub mod gateway;
pub mod middleware;
pub mod password;
pub mod token;

pub use gateway::AuthGateway;
pub use middleware::{AppState, AuthSession};
pub use password::PasswordHasher;
pub use token::TokenService;
