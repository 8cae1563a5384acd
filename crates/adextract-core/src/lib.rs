//! # Adextract Core
//!
//! Upstream adapters and normalized domain types for the Shopify and
//! Facebook Ads extraction service.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Normalized domain models** for products, orders, ad sets, ads, and insights
//! - **Adapter contracts** ([`CommerceSource`], [`AdsSource`]) with typed requests
//! - **Upstream adapters** for the Shopify Admin API and the Facebook Graph API
//! - **Process configuration** read once from the environment
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Shopify and Facebook Ads adapters |
//! | [`config`] | Environment-backed configuration |
//! | [`data_source`] | Adapter contracts and request/response types |
//! | [`domain`] | Normalized records and timestamp handling |
//! | [`error`] | Validation and configuration errors |
//! | [`http_client`] | HTTP transport abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use adextract_core::{AppConfig, CommerceSource, ProductsRequest, ReqwestHttpClient, ShopifyAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let mut shopify = ShopifyAdapter::new(config.shopify, Arc::new(ReqwestHttpClient::new()));
//!     shopify.authenticate()?;
//!
//!     let batch = shopify.products(ProductsRequest::new(10)).await?;
//!     println!("{} products", batch.products.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Adapter operations return [`SourceError`], classified by kind:
//!
//! ```rust
//! use adextract_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::Authentication => "credentials rejected",
//!         SourceErrorKind::MalformedPayload => "unexpected upstream payload",
//!         _ => "upstream call failed",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - Credentials come from the environment only and are redacted from `Debug` output
//! - Request URLs carrying tokens are never logged; only their paths are

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;

// Adapter implementations
pub use adapters::{FacebookAdsAdapter, ShopifyAdapter};

// Configuration
pub use config::{AppConfig, FacebookConfig, HttpSettings, ShopifyConfig};

// Adapter contracts and types
pub use data_source::{
    AdBatch, AdSetBatch, AdSetsRequest, AdsRequest, AdsSource, CommerceSource, HealthState,
    HealthStatus, InsightBatch, InsightsRequest, OrderBatch, OrdersRequest, ProductBatch,
    ProductsRequest, SourceError, SourceErrorKind, SourceFuture, Upstream, DEFAULT_LIMIT,
    DEFAULT_LOOKBACK_DAYS,
};

// Domain models
pub use domain::{
    Ad, AdSet, DatePreset, Insight, InsightLevel, JsonObject, Order, Product, ProductVariant,
    Timestamp,
};

// Error types
pub use error::{ConfigError, ValidationError};

// HTTP client types
pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
