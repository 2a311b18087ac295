//! Cross-origin policy.

use areyousafe_common::config::{CorsConfig, PREVIEW_HOST_SUFFIX};
use axum::http::{HeaderValue, request::Parts};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Whether `origin` is an `https` preview deployment host.
fn is_preview_origin(origin: &str) -> bool {
    origin
        .strip_prefix("https://")
        .and_then(|host| host.strip_suffix(PREVIEW_HOST_SUFFIX))
        .is_some_and(|sub| sub.len() > 1 && sub.ends_with('.') && !sub.contains('/'))
}

/// Build the CORS layer.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using wildcards.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let allow_preview = config.allow_preview_deployments();

    info!(
        origins = ?origins,
        allow_preview,
        "CORS configured"
    );

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
        origins.contains(origin)
            || (allow_preview && origin.to_str().is_ok_and(is_preview_origin))
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
