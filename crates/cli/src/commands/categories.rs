//! Category tree commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the three-level menu tree
//! stagehand categories tree
//!
//! # Put `outdoor` before `indoor` under rental/led-screen
//! stagehand categories reorder rental/led-screen outdoor indoor
//! ```
//!
//! Reordering rewrites `sort_order` to `1..=n` for every sibling in one
//! transaction, with the sibling rows locked. The slug list must name each
//! sibling exactly once (inactive ones included) or nothing is written.

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use thiserror::Error;

use stagehand_core::catalog::{CatalogError, MenuSection, build_menu, resolve_category};
use stagehand_core::{CategoryId, SlugPath};
use stagehand_storefront::db::CatalogRepository;

use super::ConnectError;

/// Errors that can occur during category commands.
#[derive(Debug, Error)]
pub enum CategoriesError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Reorder(#[from] ReorderError),
}

/// Why a requested sibling order was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("No category {0:?} under this parent")]
    UnknownSlug(String),

    #[error("Slug {0:?} listed more than once")]
    DuplicateSlug(String),

    #[error("Missing siblings: {}", .0.join(", "))]
    MissingSiblings(Vec<String>),
}

/// Print the navigation menu as the storefront would serve it.
pub async fn tree() -> Result<(), CategoriesError> {
    let pool = super::connect().await?;
    let sections = build_menu(&CatalogRepository::new(&pool)).await?;

    if sections.is_empty() {
        tracing::warn!("No active root categories");
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        println!("{}", render_tree(&sections));
    }

    Ok(())
}

/// Render menu sections as an indented outline with links.
#[must_use]
pub fn render_tree(sections: &[MenuSection]) -> String {
    let mut lines = Vec::new();

    for section in sections {
        lines.push(section.title.clone());
        for item in &section.items {
            lines.push(format!("  {}  {}", item.label, item.href));
            for sub in item.children.iter().flatten() {
                lines.push(format!("    {}  {}", sub.label, sub.href));
            }
        }
    }

    lines.join("\n")
}

/// Reorder the children of `parent` (a slug path, or `/` for the roots).
pub async fn reorder(parent: &str, slugs: &[String]) -> Result<(), CategoriesError> {
    let pool = super::connect().await?;
    let parent_id = resolve_parent(&pool, parent).await?;

    let mut tx = pool.begin().await?;

    let siblings: Vec<(i32, String)> = sqlx::query_as(
        r"
        SELECT id, slug
        FROM catalog.category
        WHERE parent_id IS NOT DISTINCT FROM $1
        ORDER BY sort_order, created_at DESC, id
        FOR UPDATE
        ",
    )
    .bind(parent_id.map(|id| id.as_i32()))
    .fetch_all(&mut *tx)
    .await?;

    let plan = plan_reorder(&siblings, slugs)?;

    for (id, sort_order) in &plan {
        sqlx::query("UPDATE catalog.category SET sort_order = $2 WHERE id = $1")
            .bind(id)
            .bind(sort_order)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(parent = %parent, updated = plan.len(), "Categories reordered");
    Ok(())
}

async fn resolve_parent(pool: &PgPool, parent: &str) -> Result<Option<CategoryId>, CatalogError> {
    if parent.trim_matches('/').is_empty() {
        return Ok(None);
    }

    let path = SlugPath::parse(parent).map_err(|reason| CatalogError::InvalidPath {
        path: parent.to_owned(),
        reason,
    })?;
    let category = resolve_category(&CatalogRepository::new(pool), &path).await?;
    Ok(Some(category.id))
}

/// Map the requested slug order onto sibling ids.
///
/// Returns `(id, sort_order)` pairs numbered from 1.
///
/// # Errors
///
/// Fails if a slug is unknown or repeated, or if any sibling is left out.
pub fn plan_reorder(
    siblings: &[(i32, String)],
    order: &[String],
) -> Result<Vec<(i32, i32)>, ReorderError> {
    let ids: HashMap<&str, i32> = siblings
        .iter()
        .map(|(id, slug)| (slug.as_str(), *id))
        .collect();

    let mut seen = HashSet::new();
    let mut plan = Vec::with_capacity(order.len());

    for (position, slug) in (1..).zip(order) {
        let id = *ids
            .get(slug.as_str())
            .ok_or_else(|| ReorderError::UnknownSlug(slug.clone()))?;
        if !seen.insert(slug.as_str()) {
            return Err(ReorderError::DuplicateSlug(slug.clone()));
        }
        plan.push((id, position));
    }

    let missing: Vec<String> = siblings
        .iter()
        .filter(|(_, slug)| !seen.contains(slug.as_str()))
        .map(|(_, slug)| slug.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ReorderError::MissingSiblings(missing));
    }

    Ok(plan)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stagehand_core::catalog::MenuItem;

    use super::*;

    fn siblings() -> Vec<(i32, String)> {
        vec![
            (101, "indoor".to_owned()),
            (100, "outdoor".to_owned()),
            (102, "curved".to_owned()),
        ]
    }

    fn slugs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_plan_numbers_from_one_in_requested_order() {
        let plan = plan_reorder(&siblings(), &slugs(&["outdoor", "curved", "indoor"])).unwrap();
        assert_eq!(plan, [(100, 1), (102, 2), (101, 3)]);
    }

    #[test]
    fn test_plan_rejects_unknown_slug() {
        let err = plan_reorder(&siblings(), &slugs(&["outdoor", "ceiling", "indoor"])).unwrap_err();
        assert_eq!(err, ReorderError::UnknownSlug("ceiling".to_owned()));
    }

    #[test]
    fn test_plan_rejects_duplicates() {
        let err = plan_reorder(&siblings(), &slugs(&["outdoor", "outdoor", "indoor"])).unwrap_err();
        assert_eq!(err, ReorderError::DuplicateSlug("outdoor".to_owned()));
    }

    #[test]
    fn test_plan_requires_every_sibling() {
        let err = plan_reorder(&siblings(), &slugs(&["outdoor", "indoor"])).unwrap_err();
        assert_eq!(err, ReorderError::MissingSiblings(vec!["curved".to_owned()]));
        assert_eq!(err.to_string(), "Missing siblings: curved");
    }

    #[test]
    fn test_render_tree() {
        let sections = vec![MenuSection {
            title: "Rental".to_owned(),
            items: vec![
                MenuItem {
                    label: "LED Screen".to_owned(),
                    href: "/products/rental/led-screen".to_owned(),
                    children: Some(vec![MenuItem {
                        label: "Indoor".to_owned(),
                        href: "/products/rental/led-screen/indoor".to_owned(),
                        children: None,
                    }]),
                },
                MenuItem {
                    label: "Sound".to_owned(),
                    href: "/products/rental/sound".to_owned(),
                    children: None,
                },
            ],
        }];

        assert_eq!(
            render_tree(&sections),
            "Rental\n  LED Screen  /products/rental/led-screen\n    Indoor  /products/rental/led-screen/indoor\n  Sound  /products/rental/sound"
        );
    }
}
