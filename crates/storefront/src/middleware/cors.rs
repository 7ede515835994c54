//! CORS for the public catalog API.
//!
//! The marketing site and the LINE portal fetch the menu and category pages
//! from the browser, so their origins must be allowed explicitly. Only
//! `GET` is ever exposed.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::REQUEST_ID_HEADER;

/// Build the CORS layer for the configured origins.
///
/// Returns `None` when no origins are configured. Origins that are not valid
/// header values are skipped with a warning.
#[must_use]
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET])
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]),
    )
}
