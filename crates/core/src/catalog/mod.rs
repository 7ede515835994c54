//! Category hierarchy navigation.
//!
//! Categories are stored as flat rows with parent pointers. This module turns
//! those rows into what a storefront page needs:
//!
//! - [`resolver`] - walk a slug path level by level to a single category
//! - [`breadcrumb`] - follow parent pointers back up to the root
//! - [`menu`] - the capped three-level navigation tree
//! - [`projector`] - active products of a category, shaped for the wire
//!
//! All persistence goes through [`CatalogReader`]. Nothing here writes.

pub mod breadcrumb;
mod error;
pub mod memory;
pub mod menu;
pub mod projector;
mod reader;
pub mod resolver;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId, PublishStatus};

pub use breadcrumb::{Crumb, build_breadcrumb};
pub use error::{BoxError, CatalogError, HierarchyFault};
pub use memory::InMemoryCatalog;
pub use menu::{MENU_DEPTH, MenuItem, MenuSection, PRODUCTS_ROOT, assemble_menu, build_menu};
pub use projector::{ProductView, ProjectionDecodeError, project_product, project_products};
pub use reader::CatalogReader;
pub use resolver::{ChildCategory, Resolution, resolve_category, resolve_path};

/// A category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    /// `None` marks a root category.
    pub parent_id: Option<CategoryId>,
    pub name: String,
    /// Unique among siblings only.
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Returns `true` if the category is publicly visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// A product row.
///
/// `images` and `features` hold JSON arrays serialized into text columns;
/// see [`projector`] for how they are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<String>,
    pub features: Option<String>,
    pub sort_order: i32,
    pub status: PublishStatus,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns `true` if the product is publicly visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Sibling order: `sort_order` ascending, newest first on ties, then id.
///
/// Mirrors the `ORDER BY sort_order, created_at DESC, id` used by the
/// Postgres repository.
#[must_use]
pub fn sibling_order(a: &Category, b: &Category) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Product order within a category, same rules as [`sibling_order`].
#[must_use]
pub fn product_order(a: &Product, b: &Product) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
