//! Root-to-leaf trails built from parent pointers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{CatalogError, CatalogReader, Category, HierarchyFault};
use crate::types::MAX_DEPTH;

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub name: String,
    pub slug: String,
}

impl From<&Category> for Crumb {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

/// Build the breadcrumb for `category`, root first.
///
/// Follows `parent_id` until a root is reached, one lookup per hop. The walk
/// gives up after [`MAX_DEPTH`] entries so a cycle in the store cannot hang
/// the request.
///
/// # Errors
///
/// Returns `CatalogError::MalformedHierarchy` if the chain is longer than
/// [`MAX_DEPTH`] or references a parent that does not exist, and
/// `CatalogError::Store` if a lookup fails.
pub async fn build_breadcrumb<R: CatalogReader>(
    reader: &R,
    category: &Category,
) -> Result<Vec<Crumb>, CatalogError> {
    let mut trail = VecDeque::from([Crumb::from(category)]);
    let mut current = category.id;
    let mut next_parent = category.parent_id;

    while let Some(parent_id) = next_parent {
        if trail.len() >= MAX_DEPTH {
            return Err(CatalogError::MalformedHierarchy {
                category: category.id,
                fault: HierarchyFault::TooDeep,
            });
        }

        let parent = reader
            .find_category(parent_id)
            .await
            .map_err(CatalogError::store)?
            .ok_or(CatalogError::MalformedHierarchy {
                category: current,
                fault: HierarchyFault::MissingParent(parent_id),
            })?;

        trail.push_front(Crumb::from(&parent));
        current = parent.id;
        next_parent = parent.parent_id;
    }

    Ok(trail.into())
}
