//! Read interface over the category and product tables.

use std::future::Future;

use super::{Category, Product};
use crate::types::CategoryId;

/// The queries catalog navigation needs from persistence.
///
/// Implementations own ordering: every list comes back sorted by
/// `sort_order` ascending, then `created_at` descending, then id (see
/// [`sibling_order`](super::sibling_order)). Implementations must be cheap to
/// share across concurrent requests; nothing here mutates.
pub trait CatalogReader: Sync {
    /// Error produced by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find the active category named `slug` directly under `parent`.
    ///
    /// `parent = None` searches root categories.
    fn find_active_category(
        &self,
        slug: &str,
        parent: Option<CategoryId>,
    ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send;

    /// Find any category by id, whatever its status.
    fn find_category(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send;

    /// Active direct children of `parent`, in sibling order.
    fn active_children(
        &self,
        parent: CategoryId,
    ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send;

    /// Number of active products directly in `category`.
    fn count_active_products(
        &self,
        category: CategoryId,
    ) -> impl Future<Output = Result<i64, Self::Error>> + Send;

    /// Active products directly in `category`, in sibling order.
    fn active_products(
        &self,
        category: CategoryId,
    ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send;

    /// Every active category reachable from an active root through active
    /// parents, down to `max_depth` levels (roots are level 1).
    fn active_categories(
        &self,
        max_depth: usize,
    ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send;
}
