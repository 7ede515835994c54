//! Integration tests for Stagehand.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and seed the sample catalog
//! cargo run -p stagehand-cli -- migrate
//! cargo run -p stagehand-cli -- seed catalog crates/cli/seed/catalog.yaml --clear
//!
//! # Start the storefront
//! cargo run -p stagehand-storefront
//!
//! # Run the ignored HTTP tests against it
//! cargo test -p stagehand-integration-tests -- --ignored
//! ```
//!
//! The assertions assume the sample catalog in `crates/cli/seed/catalog.yaml`.

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Plain HTTP client for the storefront API.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
