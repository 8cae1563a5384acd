//! Upstream adapters.
//!
//! | Adapter | Upstream | Contract |
//! |---------|----------|----------|
//! | [`ShopifyAdapter`] | Shopify Admin REST API | [`CommerceSource`](crate::CommerceSource) |
//! | [`FacebookAdsAdapter`] | Facebook Graph Marketing API | [`AdsSource`](crate::AdsSource) |

mod facebook;
mod shopify;

pub use facebook::FacebookAdsAdapter;
pub use shopify::ShopifyAdapter;
