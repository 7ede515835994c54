//! A [`CatalogReader`] over owned vectors.
//!
//! Used by tests and by tooling that already holds the whole catalog (for
//! example a seed file being previewed before it is written).

use std::convert::Infallible;

use super::{Category, CatalogReader, Product, product_order, sibling_order};
use crate::types::CategoryId;

/// In-memory catalog. Lookups are linear scans.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Create a catalog from category and product rows.
    #[must_use]
    pub const fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Add a category row.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Add a product row.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    fn sorted_active_children(&self, parent: Option<CategoryId>) -> Vec<Category> {
        let mut children: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| c.parent_id == parent && c.is_active())
            .cloned()
            .collect();
        children.sort_by(sibling_order);
        children
    }
}

impl CatalogReader for InMemoryCatalog {
    type Error = Infallible;

    async fn find_active_category(
        &self,
        slug: &str,
        parent: Option<CategoryId>,
    ) -> Result<Option<Category>, Infallible> {
        Ok(self
            .categories
            .iter()
            .find(|c| c.slug == slug && c.parent_id == parent && c.is_active())
            .cloned())
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, Infallible> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn active_children(&self, parent: CategoryId) -> Result<Vec<Category>, Infallible> {
        Ok(self.sorted_active_children(Some(parent)))
    }

    async fn count_active_products(&self, category: CategoryId) -> Result<i64, Infallible> {
        let count = self
            .products
            .iter()
            .filter(|p| p.category_id == category && p.is_active())
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn active_products(&self, category: CategoryId) -> Result<Vec<Product>, Infallible> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.category_id == category && p.is_active())
            .cloned()
            .collect();
        products.sort_by(product_order);
        Ok(products)
    }

    async fn active_categories(&self, max_depth: usize) -> Result<Vec<Category>, Infallible> {
        let mut reached = Vec::new();
        let mut level = self.sorted_active_children(None);

        for _ in 0..max_depth {
            if level.is_empty() {
                break;
            }
            let next: Vec<Category> = level
                .iter()
                .flat_map(|c| self.sorted_active_children(Some(c.id)))
                .collect();
            reached.append(&mut level);
            level = next;
        }

        Ok(reached)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::fixtures::{category, inactive, product};
    use super::*;

    fn slugs(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_find_active_category_is_scoped_to_parent() {
        let catalog = InMemoryCatalog::default()
            .with_category(category(1, None, "rental", 1))
            .with_category(category(2, None, "fixed", 2))
            .with_category(category(3, Some(1), "led-screen", 1))
            .with_category(category(4, Some(2), "led-screen", 1));

        let under_fixed = catalog
            .find_active_category("led-screen", Some(CategoryId::new(2)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(under_fixed.id, CategoryId::new(4));

        let at_root = catalog.find_active_category("led-screen", None).await.unwrap();
        assert!(at_root.is_none());
    }

    #[tokio::test]
    async fn test_active_categories_stops_below_inactive_parent() {
        let catalog = InMemoryCatalog::default()
            .with_category(category(1, None, "rental", 1))
            .with_category(inactive(category(2, Some(1), "hidden", 1)))
            .with_category(category(3, Some(2), "orphaned", 1))
            .with_category(category(4, Some(1), "visible", 2));

        let all = catalog.active_categories(3).await.unwrap();
        assert_eq!(slugs(&all), ["rental", "visible"]);
    }

    #[tokio::test]
    async fn test_active_categories_honours_max_depth() {
        let catalog = InMemoryCatalog::default()
            .with_category(category(1, None, "a", 1))
            .with_category(category(2, Some(1), "b", 1))
            .with_category(category(3, Some(2), "c", 1))
            .with_category(category(4, Some(3), "d", 1));

        assert_eq!(slugs(&catalog.active_categories(2).await.unwrap()), ["a", "b"]);
        assert_eq!(
            slugs(&catalog.active_categories(10).await.unwrap()),
            ["a", "b", "c", "d"]
        );
    }

    #[tokio::test]
    async fn test_product_queries_skip_inactive() {
        let mut hidden = product(2, 1, "hidden", 1);
        hidden.status = crate::types::PublishStatus::Inactive;
        let catalog = InMemoryCatalog::default()
            .with_category(category(1, None, "rental", 1))
            .with_product(product(1, 1, "panel", 2))
            .with_product(hidden)
            .with_product(product(3, 1, "truss", 1));

        let id = CategoryId::new(1);
        assert_eq!(catalog.count_active_products(id).await.unwrap(), 2);
        let listed: Vec<String> = catalog
            .active_products(id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(listed, ["truss", "panel"]);
    }
}
