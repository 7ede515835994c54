//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding with a JSON body. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use stagehand_core::catalog::CatalogError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog navigation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error is a server-side failure worth reporting.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Catalog(err) => !err.is_client_error(),
            Self::BadRequest(_) => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::CategoryNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::InvalidPath { .. }) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for the client. Server errors never expose details.
    fn body(&self) -> Value {
        match self {
            Self::Catalog(CatalogError::CategoryNotFound { slug, path, .. }) => json!({
                "error": "Category not found",
                "slug": slug,
                "path": path,
            }),
            Self::Catalog(CatalogError::InvalidPath { path, reason }) => json!({
                "error": format!("Invalid path: {reason}"),
                "path": path,
            }),
            Self::BadRequest(message) => json!({ "error": message }),
            Self::Catalog(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Client error");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for request-level events.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of events
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("catalog", "Resolved category path", Some(&[("path", "rental/led-screen")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
