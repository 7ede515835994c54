//! Integration tests for the storefront catalog API.
//!
//! These tests require:
//! - A running `PostgreSQL` database, migrated and seeded with
//!   `crates/cli/seed/catalog.yaml`
//! - The storefront server running (cargo run -p stagehand-storefront)
//!
//! Run with: cargo test -p stagehand-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::Value;

use stagehand_core::catalog::MenuSection;
use stagehand_integration_tests::{client, storefront_base_url};

async fn resolve(path: &str) -> (StatusCode, Value) {
    let resp = client()
        .get(format!(
            "{}/api/catalog/resolve?path={path}",
            storefront_base_url()
        ))
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

fn slugs(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v["slug"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_health_endpoints() {
    let base_url = storefront_base_url();

    let resp = client().get(format!("{base_url}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client()
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Path Resolution
// =============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_resolve_two_level_path() {
    let (status, body) = resolve("rental/led-screen").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["slug"], "led-screen");
    assert_eq!(body["path"], "rental/led-screen");
    assert_eq!(slugs(&body["breadcrumb"]), ["rental", "led-screen"]);
    // `curved` is inactive and must not be listed.
    assert_eq!(slugs(&body["children"]), ["indoor", "outdoor"]);
    assert_eq!(body["children"][0]["productCount"], 1);
    assert_eq!(slugs(&body["products"]), ["p3-9-indoor-panel"]);
    assert_eq!(body["products"][0]["images"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_same_slug_resolves_per_parent() {
    let (_, rental) = resolve("rental/led-screen").await;
    let (status, fixed) = resolve("fixed/led-screen").await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(rental["category"]["id"], fixed["category"]["id"]);
    assert_eq!(slugs(&fixed["breadcrumb"]), ["fixed", "led-screen"]);
}

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_unknown_segment_is_not_found() {
    let (status, body) = resolve("rental/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["slug"], "nonexistent");
    assert_eq!(body["path"], "rental/nonexistent");
}

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_inactive_category_is_not_found() {
    let (status, body) = resolve("rental/led-screen/curved").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["slug"], "curved");
}

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_empty_path_is_bad_request() {
    let (status, _) = resolve("/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_menu_is_three_levels() {
    let resp = client()
        .get(format!("{}/api/catalog/menu", storefront_base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let sections: Vec<MenuSection> = serde_json::from_value(body["sections"].clone()).unwrap();
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Rental", "Fixed Installation"]);

    let led = &sections[0].items[0];
    assert_eq!(led.href, "/products/rental/led-screen");

    let sub_items = led.children.as_ref().unwrap();
    assert_eq!(sub_items[0].href, "/products/rental/led-screen/indoor");
    assert!(sub_items.iter().all(|item| item.children.is_none()));
    assert!(sub_items.iter().all(|item| !item.href.ends_with("/curved")));
}
