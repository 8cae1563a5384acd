//! # Domain Models
//!
//! Normalized response types for storefront and advertising data.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Product`] | Storefront product with ordered variants |
//! | [`ProductVariant`] | Variant with price, SKU and inventory |
//! | [`Order`] | Order with pass-through customer and line items |
//! | [`AdSet`] | Ad set with schedule and targeting |
//! | [`Ad`] | Ad with status and creation time |
//! | [`Insight`] | Daily performance row |
//! | [`InsightLevel`] | Insights granularity selector |
//! | [`DatePreset`] | Coarse insights lookback window |
//! | [`Timestamp`] | Offset-preserving instant |
//!
//! Every model is built fresh from one upstream response and dropped once the
//! HTTP response is serialized.

mod ads;
mod commerce;
mod timestamp;

pub use ads::{Ad, AdSet, DatePreset, Insight, InsightLevel};
pub use commerce::{Order, Product, ProductVariant};
pub use timestamp::Timestamp;

/// Untyped JSON object passed through from an upstream payload.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
