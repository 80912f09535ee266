//! API route handlers.

pub mod auth;
pub mod user;

use crate::auth::middleware::AppState;
use crate::middleware::security_headers;
use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;

/// Maximum accepted request body, in bytes.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Build the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Authenticated user endpoints
        .route("/user/tweets/feed", get(user::feed))
        .route(
            "/user/tweets",
            get(user::list_tweets).post(user::create_tweet),
        )
        .route("/user/following", get(user::following))
        .route("/user/followers", get(user::followers))
}

/// Full application: API routes, body limit, CORS, and security headers.
pub fn app(state: AppState) -> Router {
    // Explicit CORS: deny all cross-origin requests.
    // CorsLayer::new() with no allowed origins rejects all CORS preflight requests.
    let cors = CorsLayer::new();

    api_router()
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state)
}
