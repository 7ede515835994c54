//! Catalog API handlers.
//!
//! Both endpoints are read-only views over the category tree. Category pages
//! fail loudly (404 names the segment that did not resolve); the menu is
//! rendered on every page, so it degrades to an empty list instead.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use stagehand_core::catalog::{MenuSection, Resolution, build_menu, resolve_path};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Query parameters for `/api/catalog/resolve`.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    /// Slash-delimited slug path; a missing parameter counts as empty.
    #[serde(default)]
    pub path: String,
}

/// Resolve a slug path into a category page.
#[instrument(skip(state, query))]
pub async fn resolve(
    State(state): State<AppState>,
    query: std::result::Result<Query<ResolveQuery>, QueryRejection>,
) -> Result<Json<Resolution>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    add_breadcrumb(
        "catalog",
        "Resolving category path",
        Some(&[("path", query.path.as_str())]),
    );

    let resolution = resolve_path(&state.catalog(), &query.path).await?;
    Ok(Json(resolution))
}

/// Body of `/api/catalog/menu`.
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub success: bool,
    pub sections: Vec<MenuSection>,
}

/// Build the navigation menu.
///
/// A store failure answers 503 with `success: false` and no sections so the
/// page can still render without navigation.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> impl IntoResponse {
    match build_menu(&state.catalog()).await {
        Ok(sections) => (
            StatusCode::OK,
            Json(MenuResponse {
                success: true,
                sections,
            }),
        ),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                sentry_event_id = %event_id,
                "Failed to build navigation menu"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(MenuResponse {
                    success: false,
                    sections: Vec::new(),
                }),
            )
        }
    }
}
