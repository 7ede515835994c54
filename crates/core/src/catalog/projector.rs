//! Product rows shaped for presentation.
//!
//! `images` and `features` live in text columns holding JSON arrays. Those
//! columns are often edited by hand in SQL, so decoding is lenient: a blank, `null` or malformed value becomes an empty list and the
//! product is still shown.

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{CatalogError, CatalogReader, Product};
use crate::types::{CategoryId, ProductId};

/// A product as returned to storefront clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// Image URLs.
    pub images: Vec<String>,
    /// Free-form feature entries (strings or objects, as authored).
    pub features: Vec<serde_json::Value>,
    pub sort_order: i32,
}

/// A serialized list column that could not be decoded.
///
/// Never returned to callers; logged and replaced by an empty list.
#[derive(Debug, Error)]
#[error("could not decode {field} of product {product}: {source}")]
pub struct ProjectionDecodeError {
    pub product: ProductId,
    pub field: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Decode a JSON array stored as text.
///
/// `None`, blank text and the literal `null` all decode to an empty list.
///
/// # Errors
///
/// Returns the `serde_json` error if the text is not a JSON array of `T`.
pub fn decode_list<T: DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str::<Option<Vec<T>>>(text).map(Option::unwrap_or_default),
    }
}

fn decode_field<T: DeserializeOwned>(
    product: ProductId,
    field: &'static str,
    raw: Option<&str>,
) -> Vec<T> {
    decode_list(raw).unwrap_or_else(|source| {
        let err = ProjectionDecodeError {
            product,
            field,
            source,
        };
        tracing::warn!(error = %err, "Serving product with empty {field}");
        Vec::new()
    })
}

/// Shape one product row for presentation.
#[must_use]
pub fn project_product(product: Product) -> ProductView {
    let images = decode_field(product.id, "images", product.images.as_deref());
    let features = decode_field(product.id, "features", product.features.as_deref());

    ProductView {
        id: product.id,
        category_id: product.category_id,
        name: product.name,
        slug: product.slug,
        description: product.description,
        price: product.price,
        images,
        features,
        sort_order: product.sort_order,
    }
}

/// Active products of `category`, in display order.
///
/// # Errors
///
/// Returns `CatalogError::Store` if the product query fails. Decode problems
/// never fail the call.
pub async fn project_products<R: CatalogReader>(
    reader: &R,
    category: CategoryId,
) -> Result<Vec<ProductView>, CatalogError> {
    let products = reader
        .active_products(category)
        .await
        .map_err(CatalogError::store)?;

    Ok(products
        .into_iter()
        .filter(Product::is_active)
        .map(project_product)
        .collect())
}
