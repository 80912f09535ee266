//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Middleware that adds security headers to all responses.
///
/// The service only speaks JSON, so the policy is locked down completely:
///
/// - **Cache-Control: no-store**: feeds and tokens must not land in shared caches.
/// - **X-Content-Type-Options: nosniff**: browsers respect the declared JSON type.
/// - **X-Frame-Options: DENY** and `frame-ancestors 'none'`: no embedding.
/// - **Referrer-Policy: no-referrer**
/// - **Content-Security-Policy: default-src 'none'**: nothing may load from a response.
///
/// # Usage
///
/// ```rust,no_run
/// use axum::Router;
/// use axum::middleware;
/// use flock::middleware::security_headers;
///
/// let app: Router = Router::new()
///     .layer(middleware::from_fn(security_headers));
/// ```
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("cache-control", HeaderValue::from_static("no-store"));
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    response
}
