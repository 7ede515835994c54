//! Seed the catalog from a YAML category tree.
//!
//! # File Format
//!
//! ```yaml
//! categories:
//!   - name: Rental
//!     slug: rental
//!     children:
//!       - name: LED Screen
//!         slug: led-screen
//!         products:
//!           - name: P3.9 Indoor Panel
//!             slug: p3-9-indoor-panel
//!             price: "1500.00"
//!             images: ["/uploads/p3-9.jpg"]
//!             features: ["500 x 500 mm cabinet", { "brightness": "4500 nits" }]
//! ```
//!
//! `sort_order` defaults to the 1-based position among siblings and `status`
//! to `active`. The whole file is validated before connecting, then inserted
//! in a single transaction. `--dry-run` stops after validation and prints the
//! menu the file would produce.

use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{Postgres, Transaction};
use thiserror::Error;
use tracing::{error, info};

use stagehand_core::catalog::{CatalogError, Category, InMemoryCatalog, build_menu};
use stagehand_core::{CategoryId, MAX_DEPTH, PublishStatus};

use super::ConnectError;
use super::categories::render_tree;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} validation errors found")]
    Invalid(usize),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to encode product field: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Top-level seed document.
#[derive(Debug, Deserialize)]
pub struct CatalogSeed {
    pub categories: Vec<SeedCategory>,
}

/// A category and everything under it.
#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    #[serde(default)]
    pub children: Vec<SeedCategory>,
}

/// A product listed directly in its category.
#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<serde_json::Value>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub status: PublishStatus,
}

/// Rows written by a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
}

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `clear_existing` - If true, delete all categories and products first
/// * `dry_run` - If true, print the menu preview and write nothing
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation, or if any
/// insert fails (in which case nothing is written).
pub async fn catalog(
    file_path: &str,
    clear_existing: bool,
    dry_run: bool,
) -> Result<(), SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: CatalogSeed = serde_yaml::from_str(&content)?;

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(SeedError::Invalid(errors.len()));
    }

    if dry_run {
        let sections = build_menu(&preview(&seed)).await?;
        #[allow(clippy::print_stdout)]
        {
            println!("{}", render_tree(&sections));
        }
        info!("Dry run: nothing written");
        return Ok(());
    }

    let pool = super::connect().await?;
    let mut tx = pool.begin().await?;

    if clear_existing {
        info!("Clearing existing catalog");
        sqlx::query("DELETE FROM catalog.product")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM catalog.category")
            .execute(&mut *tx)
            .await?;
    }

    let summary = insert_tree(&mut tx, &seed.categories).await?;
    tx.commit().await?;

    info!("Seeding complete!");
    info!("  Categories inserted: {}", summary.categories);
    info!("  Products inserted: {}", summary.products);

    Ok(())
}

/// Check the tree for problems the database would reject (or accept and then
/// never resolve).
#[must_use]
pub fn validate(seed: &CatalogSeed) -> Vec<String> {
    let mut errors = Vec::new();
    let mut stack: Vec<(String, usize, &[SeedCategory])> =
        vec![(String::new(), 1, seed.categories.as_slice())];

    while let Some((parent_path, depth, siblings)) = stack.pop() {
        let mut seen = HashSet::new();

        for category in siblings {
            let path = if parent_path.is_empty() {
                category.slug.clone()
            } else {
                format!("{parent_path}/{}", category.slug)
            };

            if let Some(problem) = slug_problem(&category.slug) {
                errors.push(format!("category {path:?}: {problem}"));
            }
            if category.name.trim().is_empty() {
                errors.push(format!("category {path:?}: name is empty"));
            }
            if !seen.insert(category.slug.as_str()) {
                errors.push(format!("category {path:?}: duplicate slug among siblings"));
            }
            if depth > MAX_DEPTH {
                errors.push(format!("category {path:?}: deeper than {MAX_DEPTH} levels"));
            }

            let mut product_slugs = HashSet::new();
            for product in &category.products {
                if let Some(problem) = slug_problem(&product.slug) {
                    errors.push(format!("product {path:?}/{}: {problem}", product.slug));
                }
                if !product_slugs.insert(product.slug.as_str()) {
                    errors.push(format!(
                        "product {path:?}/{}: duplicate slug in category",
                        product.slug
                    ));
                }
                if product.price.is_some_and(|price| price.is_sign_negative()) {
                    errors.push(format!("product {path:?}/{}: negative price", product.slug));
                }
            }

            if !category.children.is_empty() {
                stack.push((path, depth + 1, category.children.as_slice()));
            }
        }
    }

    errors
}

fn slug_problem(slug: &str) -> Option<&'static str> {
    if slug.trim().is_empty() {
        Some("slug is empty")
    } else if slug.contains('/') {
        Some("slug contains '/'")
    } else if slug != slug.trim() {
        Some("slug has surrounding whitespace")
    } else {
        None
    }
}

/// Position-based default for `sort_order`.
fn default_order(index: usize) -> i32 {
    i32::try_from(index + 1).unwrap_or(i32::MAX)
}

/// Siblings paired with their effective `sort_order`, last first so that
/// pushing onto a stack pops them in file order.
fn stack_order(siblings: &[SeedCategory]) -> impl Iterator<Item = (i32, &SeedCategory)> {
    siblings
        .iter()
        .enumerate()
        .rev()
        .map(|(i, c)| (c.sort_order.unwrap_or_else(|| default_order(i)), c))
}

/// The categories of `seed` as rows with provisional ids, ready for the
/// menu builder.
#[must_use]
pub fn preview(seed: &CatalogSeed) -> InMemoryCatalog {
    let created_at = Utc::now();
    let mut categories = Vec::new();
    let mut next_id = 1;
    let mut stack: Vec<(Option<CategoryId>, i32, &SeedCategory)> = stack_order(&seed.categories)
        .map(|(sort_order, c)| (None, sort_order, c))
        .collect();

    while let Some((parent_id, sort_order, seeded)) = stack.pop() {
        let id = CategoryId::new(next_id);
        next_id += 1;

        categories.push(Category {
            id,
            parent_id,
            name: seeded.name.clone(),
            slug: seeded.slug.clone(),
            description: seeded.description.clone(),
            image_url: seeded.image_url.clone(),
            sort_order,
            status: seeded.status,
            created_at,
        });

        stack.extend(
            stack_order(&seeded.children).map(|(sort_order, c)| (Some(id), sort_order, c)),
        );
    }

    InMemoryCatalog::new(categories, Vec::new())
}

async fn insert_tree(
    tx: &mut Transaction<'_, Postgres>,
    roots: &[SeedCategory],
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();
    let mut stack: Vec<(Option<i32>, i32, &SeedCategory)> = stack_order(roots)
        .map(|(sort_order, c)| (None, sort_order, c))
        .collect();

    while let Some((parent_id, sort_order, category)) = stack.pop() {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO catalog.category
                (parent_id, name, slug, description, image_url, sort_order, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7::catalog.publish_status)
            RETURNING id
            ",
        )
        .bind(parent_id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.image_url)
        .bind(sort_order)
        .bind(category.status.to_string())
        .fetch_one(&mut **tx)
        .await?;
        summary.categories += 1;

        for (i, product) in category.products.iter().enumerate() {
            insert_product(tx, id, default_order(i), product).await?;
            summary.products += 1;
        }

        stack.extend(
            stack_order(&category.children).map(|(sort_order, c)| (Some(id), sort_order, c)),
        );
    }

    Ok(summary)
}

async fn insert_product(
    tx: &mut Transaction<'_, Postgres>,
    category_id: i32,
    default_sort_order: i32,
    product: &SeedProduct,
) -> Result<(), SeedError> {
    // Empty lists are stored as NULL; the projector reads both as [].
    let images = json_list(&product.images)?;
    let features = json_list(&product.features)?;

    sqlx::query(
        r"
        INSERT INTO catalog.product
            (category_id, name, slug, description, price, images, features, sort_order, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::catalog.publish_status)
        ",
    )
    .bind(category_id)
    .bind(&product.name)
    .bind(&product.slug)
    .bind(&product.description)
    .bind(product.price)
    .bind(images)
    .bind(features)
    .bind(product.sort_order.unwrap_or(default_sort_order))
    .bind(product.status.to_string())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn json_list<T: serde::Serialize>(items: &[T]) -> Result<Option<String>, serde_json::Error> {
    if items.is_empty() {
        Ok(None)
    } else {
        serde_json::to_string(items).map(Some)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../seed/catalog.yaml");

    fn parse(yaml: &str) -> CatalogSeed {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        let seed = parse(SAMPLE);
        assert!(validate(&seed).is_empty(), "{:?}", validate(&seed));

        let rental = seed.categories.iter().find(|c| c.slug == "rental").unwrap();
        assert!(rental.children.iter().any(|c| c.slug == "led-screen"));
    }

    #[test]
    fn test_same_slug_under_different_parents_is_allowed() {
        let seed = parse(
            r"
categories:
  - { name: Rental, slug: rental, children: [{ name: LED Screen, slug: led-screen }] }
  - { name: Fixed, slug: fixed, children: [{ name: LED Screen, slug: led-screen }] }
",
        );
        assert!(validate(&seed).is_empty());
    }

    #[test]
    fn test_validation_reports_each_problem() {
        let seed = parse(
            r#"
categories:
  - name: Rental
    slug: rental
    children:
      - { name: Sound, slug: sound }
      - { name: Sound Again, slug: sound }
      - { name: "", slug: "bad/slug" }
    products:
      - { name: Truss, slug: truss, price: "-1.00" }
"#,
        );

        let errors = validate(&seed);
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("duplicate slug among siblings")));
        assert!(errors.iter().any(|e| e.contains("slug contains '/'")));
        assert!(errors.iter().any(|e| e.contains("name is empty")));
        assert!(errors.iter().any(|e| e.contains("negative price")));
    }

    #[test]
    fn test_defaults() {
        let seed = parse("categories: [{ name: Rental, slug: rental, products: [{ name: A, slug: a }] }]");
        let rental = &seed.categories[0];
        assert_eq!(rental.status, PublishStatus::Active);
        assert!(rental.sort_order.is_none());
        assert_eq!(default_order(0), 1);
        assert!(rental.products[0].images.is_empty());
    }

    #[tokio::test]
    async fn test_preview_menu_matches_file_order() {
        let sections = build_menu(&preview(&parse(SAMPLE))).await.unwrap();

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Rental", "Fixed Installation"]);

        let led = &sections[0].items[0];
        assert_eq!(led.href, "/products/rental/led-screen");
        let sub_items: Vec<&str> = led
            .children
            .iter()
            .flatten()
            .map(|item| item.href.as_str())
            .collect();
        // `curved` is inactive.
        assert_eq!(
            sub_items,
            [
                "/products/rental/led-screen/indoor",
                "/products/rental/led-screen/outdoor"
            ]
        );
    }

    #[test]
    fn test_explicit_sort_order_wins() {
        let seed = parse(
            r"
categories:
  - { name: Rental, slug: rental, sort_order: 2 }
  - { name: Fixed, slug: fixed }
",
        );
        let order: Vec<(i32, &str)> = stack_order(&seed.categories)
            .map(|(sort_order, c)| (sort_order, c.slug.as_str()))
            .collect();
        assert_eq!(order, [(2, "fixed"), (2, "rental")]);
    }

    #[test]
    fn test_empty_lists_are_stored_as_null() {
        assert_eq!(json_list::<String>(&[]).unwrap(), None);
        assert_eq!(
            json_list(&["/uploads/a.jpg".to_owned()]).unwrap().as_deref(),
            Some(r#"["/uploads/a.jpg"]"#)
        );
    }
}
