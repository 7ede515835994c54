//! Slug path resolution.
//!
//! A path like `rental/led-screen/indoor` is resolved one level at a time:
//! each segment must name an active category whose parent is the category
//! resolved for the previous segment (or no parent, for the first). Slugs are
//! only unique among siblings, so `rental/led-screen` and `fixed/led-screen`
//! are two different categories.

use serde::Serialize;
use tracing::instrument;

use super::{
    CatalogError, CatalogReader, Category, Crumb, ProductView, build_breadcrumb, project_products,
};
use crate::types::{SlugPath, SlugPathError};

/// Everything a category page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub category: Category,
    pub children: Vec<ChildCategory>,
    pub products: Vec<ProductView>,
    pub breadcrumb: Vec<Crumb>,
    /// The normalized path that was resolved.
    pub path: SlugPath,
}

/// An active child category annotated with its active product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildCategory {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

/// Resolve a raw slash-delimited path into a full category page.
///
/// # Errors
///
/// - `CatalogError::InvalidPath` if `raw` has no usable segments
/// - `CatalogError::CategoryNotFound` naming the first segment that does not resolve
/// - `CatalogError::MalformedHierarchy` if the breadcrumb walk finds a broken chain
/// - `CatalogError::Store` if any read fails
#[instrument(skip(reader))]
pub async fn resolve_path<R: CatalogReader>(
    reader: &R,
    raw: &str,
) -> Result<Resolution, CatalogError> {
    let path = SlugPath::parse(raw).map_err(|reason| CatalogError::InvalidPath {
        path: raw.to_owned(),
        reason,
    })?;

    let category = resolve_category(reader, &path).await?;
    let children = annotate_children(reader, &category).await?;
    let breadcrumb = build_breadcrumb(reader, &category).await?;
    let products = project_products(reader, category.id).await?;

    tracing::debug!(
        category_id = %category.id,
        children = children.len(),
        products = products.len(),
        "Resolved category path"
    );

    Ok(Resolution {
        category,
        children,
        products,
        breadcrumb,
        path,
    })
}

/// Walk `path` down from the roots and return the category it names.
///
/// Stops at the first segment that does not match; later segments are never
/// looked up.
///
/// # Errors
///
/// Returns `CatalogError::CategoryNotFound` for the failing segment, or
/// `CatalogError::Store` if a lookup fails.
pub async fn resolve_category<R: CatalogReader>(
    reader: &R,
    path: &SlugPath,
) -> Result<Category, CatalogError> {
    let mut parent = None;
    let mut resolved = None;

    for (depth, segment) in path.segments().iter().enumerate() {
        let Some(category) = reader
            .find_active_category(segment, parent)
            .await
            .map_err(CatalogError::store)?
        else {
            return Err(CatalogError::CategoryNotFound {
                slug: segment.clone(),
                depth,
                path: path.to_string(),
            });
        };

        parent = Some(category.id);
        resolved = Some(category);
    }

    resolved.ok_or_else(|| CatalogError::InvalidPath {
        path: path.to_string(),
        reason: SlugPathError::Empty,
    })
}

async fn annotate_children<R: CatalogReader>(
    reader: &R,
    category: &Category,
) -> Result<Vec<ChildCategory>, CatalogError> {
    let children = reader
        .active_children(category.id)
        .await
        .map_err(CatalogError::store)?;

    let mut annotated = Vec::with_capacity(children.len());
    for child in children {
        let product_count = reader
            .count_active_products(child.id)
            .await
            .map_err(CatalogError::store)?;
        annotated.push(ChildCategory {
            category: child,
            product_count,
        });
    }

    Ok(annotated)
}
