//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness probe
//! GET  /health/ready           - Readiness probe (checks the database)
//!
//! # Catalog API
//! GET  /api/catalog/resolve?path=rental/led-screen - Category page for a slug path
//! GET  /api/catalog/menu       - Navigation menu (three levels)
//! ```

pub mod catalog;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the catalog API router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/resolve", get(catalog::resolve))
        .route("/menu", get(catalog::menu))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/catalog", catalog_routes())
}
