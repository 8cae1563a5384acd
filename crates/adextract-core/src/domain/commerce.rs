use serde::{Deserialize, Serialize};

use crate::{JsonObject, Timestamp};

/// Normalized storefront product with its variants in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub product_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub variants: Vec<ProductVariant>,
}

/// Purchasable variant of a [`Product`].
///
/// `product_id` is a back-reference to the parent product, not an owning link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: i64,
    pub product_id: i64,
    pub title: String,
    /// Decimal amount as sent by the upstream, e.g. `"19.99"`.
    pub price: String,
    pub sku: Option<String>,
    pub inventory_quantity: i64,
}

/// Normalized storefront order.
///
/// `customer` and `line_items` are passed through untouched; their inner shape
/// is owned by the upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: i64,
    pub customer: Option<JsonObject>,
    pub created_at: Timestamp,
    pub total_price: String,
    pub line_items: Vec<JsonObject>,
}
