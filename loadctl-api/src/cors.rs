//! CORS layer built from server configuration

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Allow the configured origins to drive the API from a browser
///
/// `"*"` allows any origin. Origins that are not valid header values are
/// skipped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS configured to allow any origin");
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}
