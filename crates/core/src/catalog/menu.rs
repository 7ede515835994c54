//! Navigation menu built from the category hierarchy.
//!
//! The menu is always three levels: root categories become sections, their
//! children become items, and grandchildren become sub-items. Deeper
//! categories are reachable through path resolution but never appear here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{CatalogError, CatalogReader, Category, sibling_order};
use crate::types::CategoryId;

/// Number of hierarchy levels materialized in the menu.
pub const MENU_DEPTH: usize = 3;

/// URL prefix under which category pages live.
pub const PRODUCTS_ROOT: &str = "/products";

/// A top-level menu group, one per active root category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// A link in the menu.
///
/// `children` is only present on second-level items that have active
/// sub-categories; sub-items never carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuItem>>,
}

/// Build the menu from an already-loaded set of categories.
///
/// Inactive rows are ignored, and so is everything beneath them. Every level
/// is in sibling order.
#[must_use]
pub fn assemble_menu(categories: &[Category]) -> Vec<MenuSection> {
    let mut by_parent: HashMap<Option<CategoryId>, Vec<&Category>> = HashMap::new();
    for category in categories.iter().filter(|c| c.is_active()) {
        by_parent.entry(category.parent_id).or_default().push(category);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by(|a, b| sibling_order(a, b));
    }

    children(&by_parent, None)
        .iter()
        .map(|root| MenuSection {
            title: root.name.clone(),
            items: children(&by_parent, Some(root.id))
                .iter()
                .map(|child| {
                    let href = format!("{PRODUCTS_ROOT}/{}/{}", root.slug, child.slug);
                    let sub_items: Vec<MenuItem> = children(&by_parent, Some(child.id))
                        .iter()
                        .map(|grandchild| MenuItem {
                            label: grandchild.name.clone(),
                            href: format!("{href}/{}", grandchild.slug),
                            children: None,
                        })
                        .collect();

                    MenuItem {
                        label: child.name.clone(),
                        href,
                        children: (!sub_items.is_empty()).then_some(sub_items),
                    }
                })
                .collect(),
        })
        .collect()
}

fn children<'a>(
    by_parent: &'a HashMap<Option<CategoryId>, Vec<&'a Category>>,
    parent: Option<CategoryId>,
) -> &'a [&'a Category] {
    by_parent
        .get(&parent)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Load the active hierarchy and build the menu.
///
/// # Errors
///
/// Returns `CatalogError::Store` if the categories cannot be read. Callers
/// serving pages should degrade to an empty menu rather than fail.
pub async fn build_menu<R: CatalogReader>(reader: &R) -> Result<Vec<MenuSection>, CatalogError> {
    let categories = reader
        .active_categories(MENU_DEPTH)
        .await
        .map_err(CatalogError::store)?;

    tracing::debug!(categories = categories.len(), "Assembling navigation menu");
    Ok(assemble_menu(&categories))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::super::InMemoryCatalog;
    use super::super::fixtures::{category, inactive};
    use super::*;

    fn rental_catalog() -> Vec<Category> {
        vec![
            category(1, None, "rental", 1),
            category(2, None, "fixed", 2),
            category(10, Some(1), "led-screen", 1),
            category(11, Some(1), "sound", 2),
            category(12, Some(1), "lighting", 3),
            category(20, Some(10), "indoor", 2),
            category(21, Some(10), "outdoor", 1),
            category(30, Some(2), "led-screen", 1),
        ]
    }

    #[test]
    fn test_empty_catalog_yields_no_sections() {
        assert!(assemble_menu(&[]).is_empty());
    }

    #[test]
    fn test_sections_follow_root_order() {
        let menu = assemble_menu(&rental_catalog());
        let titles: Vec<&str> = menu.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Rental", "Fixed"]);
    }

    #[test]
    fn test_items_and_sub_items_have_joined_hrefs() {
        let menu = assemble_menu(&rental_catalog());
        let rental = &menu[0];

        let hrefs: Vec<&str> = rental.items.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(
            hrefs,
            [
                "/products/rental/led-screen",
                "/products/rental/sound",
                "/products/rental/lighting",
            ]
        );

        let subs = rental.items[0].children.as_ref().unwrap();
        let sub_hrefs: Vec<&str> = subs.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(
            sub_hrefs,
            [
                "/products/rental/led-screen/outdoor",
                "/products/rental/led-screen/indoor",
            ]
        );
        assert!(rental.items[1].children.is_none());

        assert_eq!(menu[1].items[0].href, "/products/fixed/led-screen");
    }

    #[test]
    fn test_never_emits_fourth_level() {
        let mut categories = rental_catalog();
        categories.push(category(40, Some(20), "deep", 1));
        categories.push(category(41, Some(40), "deeper", 1));

        let menu = assemble_menu(&categories);
        for section in &menu {
            for item in &section.items {
                for sub in item.children.iter().flatten() {
                    assert!(sub.children.is_none());
                }
            }
        }
        let json = serde_json::to_string(&menu).unwrap();
        assert!(!json.contains("deep"));
    }

    #[test]
    fn test_inactive_subtrees_are_dropped() {
        let mut categories = rental_catalog();
        categories[2] = inactive(categories[2].clone());
        categories.push(inactive(category(3, None, "archive", 0)));
        categories.push(category(31, Some(3), "old-stock", 1));

        let menu = assemble_menu(&categories);
        assert_eq!(menu.len(), 2);
        let rental_hrefs: Vec<&str> = menu[0].items.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(rental_hrefs, ["/products/rental/sound", "/products/rental/lighting"]);
    }

    #[test]
    fn test_wire_shape_omits_missing_children() {
        let menu = assemble_menu(&[category(1, None, "rental", 1), category(2, Some(1), "sound", 1)]);
        assert_eq!(
            serde_json::to_value(&menu).unwrap(),
            json!([{
                "title": "Rental",
                "items": [{"label": "Sound", "href": "/products/rental/sound"}]
            }])
        );
    }

    #[tokio::test]
    async fn test_build_menu_reads_through_catalog() {
        let catalog = InMemoryCatalog::new(rental_catalog(), Vec::new());
        let menu = build_menu(&catalog).await.unwrap();
        assert_eq!(menu, assemble_menu(&rental_catalog()));
    }
}
