//! Request query parameters and response bodies.
//!
//! Single-endpoint responses share one shape per upstream with exactly one
//! field populated; the rest serialize as `null`.

use adextract_core::{
    Ad, AdSet, HealthStatus, Insight, InsightLevel, Order, Product, DEFAULT_LIMIT,
    DEFAULT_LOOKBACK_DAYS,
};
use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

const fn default_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_level() -> String {
    InsightLevel::default().as_str().to_owned()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersQuery {
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// `level` stays a string here so an unknown value reaches the handler and
/// fails like any other upstream error.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsQuery {
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombinedDataQuery {
    #[serde(default = "default_limit")]
    pub product_limit: u32,
    #[serde(default = "default_days")]
    pub order_days: i64,
    #[serde(default = "default_limit")]
    pub order_limit: u32,
    #[serde(default = "default_limit")]
    pub fb_adset_limit: u32,
    #[serde(default = "default_limit")]
    pub fb_ad_limit: u32,
    #[serde(default = "default_days")]
    pub fb_insight_days: i64,
    #[serde(default = "default_level")]
    pub fb_insight_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopifyDataResponse {
    pub products: Option<Vec<Product>>,
    pub orders: Option<Vec<Order>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacebookDataResponse {
    pub adsets: Option<Vec<AdSet>>,
    pub ads: Option<Vec<Ad>>,
    pub insights: Option<Vec<Insight>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedDataResponse {
    pub shopify: ShopifyDataResponse,
    pub facebook: FacebookDataResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every upstream is healthy, otherwise `degraded`.
    pub status: String,
    pub upstreams: Vec<HealthStatus>,
}

impl HealthResponse {
    pub fn from_statuses(upstreams: Vec<HealthStatus>) -> Self {
        let status = if upstreams.iter().all(HealthStatus::is_healthy) {
            "ok"
        } else {
            "degraded"
        };
        Self {
            status: status.to_owned(),
            upstreams,
        }
    }
}
