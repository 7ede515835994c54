//! Stagehand storefront library.
//!
//! Public catalog API for the events/rental storefront: category pages
//! resolved from slug paths and the navigation menu. Exposed as a library so
//! the router can be driven in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Layers run outermost first: Sentry hub and transaction, CORS, the HTTP
/// trace span, then request id (which records into that span).
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config().cors_origins);

    let router = routes::routes()
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::trace_layer());

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
