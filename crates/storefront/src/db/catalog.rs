//! Catalog repository: the `PostgreSQL` side of [`CatalogReader`].
//!
//! Queries are checked at runtime (`sqlx::query_as`) against the
//! `catalog.category` and `catalog.product` tables. Status columns are read
//! as text so the enum mapping stays in [`PublishStatus::from_str`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use stagehand_core::catalog::{CatalogReader, Category, Product};
use stagehand_core::{CategoryId, ProductId, PublishStatus};

use super::RepositoryError;

const CATEGORY_COLUMNS: &str = "id, parent_id, name, slug, description, image_url, sort_order, \
                                status::text AS status, created_at";

const PRODUCT_COLUMNS: &str = "id, category_id, name, slug, description, price, images, features, \
                               sort_order, status::text AS status, created_at";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for category queries.
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    parent_id: Option<i32>,
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
    sort_order: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(row.id),
            parent_id: row.parent_id.map(CategoryId::new),
            name: row.name,
            slug: row.slug,
            description: row.description,
            image_url: row.image_url,
            sort_order: row.sort_order,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    category_id: i32,
    name: String,
    slug: String,
    description: Option<String>,
    price: Option<Decimal>,
    images: Option<String>,
    features: Option<String>,
    sort_order: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            images: row.images,
            features: row.features,
            sort_order: row.sort_order,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<PublishStatus, RepositoryError> {
    PublishStatus::from_str(raw).map_err(RepositoryError::DataCorruption)
}

fn into_categories(rows: Vec<CategoryRow>) -> Result<Vec<Category>, RepositoryError> {
    rows.into_iter().map(Category::try_from).collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Read-only repository over the catalog tables.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogReader for CatalogRepository<'_> {
    type Error = RepositoryError;

    #[instrument(skip(self))]
    async fn find_active_category(
        &self,
        slug: &str,
        parent: Option<CategoryId>,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r"
            SELECT {CATEGORY_COLUMNS}
            FROM catalog.category
            WHERE slug = $1
              AND parent_id IS NOT DISTINCT FROM $2
              AND status = 'active'
            "
        ))
        .bind(slug)
        .bind(parent.map(|id| id.as_i32()))
        .fetch_optional(self.pool)
        .await?;

        row.map(Category::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r"
            SELECT {CATEGORY_COLUMNS}
            FROM catalog.category
            WHERE id = $1
            "
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Category::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn active_children(&self, parent: CategoryId) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            r"
            SELECT {CATEGORY_COLUMNS}
            FROM catalog.category
            WHERE parent_id = $1
              AND status = 'active'
            ORDER BY sort_order, created_at DESC, id
            "
        ))
        .bind(parent.as_i32())
        .fetch_all(self.pool)
        .await?;

        into_categories(rows)
    }

    #[instrument(skip(self))]
    async fn count_active_products(&self, category: CategoryId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM catalog.product
            WHERE category_id = $1
              AND status = 'active'
            ",
        )
        .bind(category.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn active_products(&self, category: CategoryId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM catalog.product
            WHERE category_id = $1
              AND status = 'active'
            ORDER BY sort_order, created_at DESC, id
            "
        ))
        .bind(category.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Loads the bounded tree in one round trip with a recursive CTE.
    ///
    /// Recursion only follows active rows and stops at `max_depth`, so a
    /// cycle in `parent_id` cannot run away.
    #[instrument(skip(self))]
    async fn active_categories(&self, max_depth: usize) -> Result<Vec<Category>, RepositoryError> {
        let max_depth = i32::try_from(max_depth).unwrap_or(i32::MAX);

        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            r"
            WITH RECURSIVE tree AS (
                SELECT id, parent_id, name, slug, description, image_url,
                       sort_order, status, created_at, 1 AS depth
                FROM catalog.category
                WHERE parent_id IS NULL
                  AND status = 'active'
                UNION ALL
                SELECT c.id, c.parent_id, c.name, c.slug, c.description, c.image_url,
                       c.sort_order, c.status, c.created_at, tree.depth + 1
                FROM catalog.category c
                JOIN tree ON c.parent_id = tree.id
                WHERE c.status = 'active'
                  AND tree.depth < $1
            )
            SELECT {CATEGORY_COLUMNS}
            FROM tree
            ORDER BY depth, sort_order, created_at DESC, id
            "
        ))
        .bind(max_depth)
        .fetch_all(self.pool)
        .await?;

        into_categories(rows)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn category_row(status: &str) -> CategoryRow {
        CategoryRow {
            id: 10,
            parent_id: Some(1),
            name: "LED Screen".to_owned(),
            slug: "led-screen".to_owned(),
            description: None,
            image_url: Some("/uploads/led.jpg".to_owned()),
            sort_order: 1,
            status: status.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_row_conversion() {
        let category = Category::try_from(category_row("active")).unwrap();
        assert_eq!(category.id, CategoryId::new(10));
        assert_eq!(category.parent_id, Some(CategoryId::new(1)));
        assert!(category.is_active());
    }

    #[test]
    fn test_unknown_status_is_data_corruption() {
        let err = Category::try_from(category_row("archived")).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[test]
    fn test_product_row_conversion_keeps_raw_lists() {
        let row = ProductRow {
            id: 3,
            category_id: 10,
            name: "P3.9 Indoor Panel".to_owned(),
            slug: "p3-9-indoor-panel".to_owned(),
            description: None,
            price: Some(Decimal::new(150_000, 2)),
            images: Some("[\"/uploads/p3.jpg\"]".to_owned()),
            features: None,
            sort_order: 1,
            status: "inactive".to_owned(),
            created_at: Utc::now(),
        };

        let product = Product::try_from(row).unwrap();
        assert_eq!(product.category_id, CategoryId::new(10));
        assert_eq!(product.images.as_deref(), Some("[\"/uploads/p3.jpg\"]"));
        assert!(!product.is_active());
    }
}
