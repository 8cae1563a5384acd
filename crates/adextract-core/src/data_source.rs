//! Adapter contracts and request/response types.
//!
//! This module defines the two upstream-facing contracts, [`CommerceSource`]
//! and [`AdsSource`], along with the request and batch types for each
//! operation.
//!
//! # Operations
//!
//! | Contract | Operation | Request | Response |
//! |----------|-----------|---------|----------|
//! | Commerce | products | [`ProductsRequest`] | [`ProductBatch`] |
//! | Commerce | orders | [`OrdersRequest`] | [`OrderBatch`] |
//! | Ads | ad sets | [`AdSetsRequest`] | [`AdSetBatch`] |
//! | Ads | ads | [`AdsRequest`] | [`AdBatch`] |
//! | Ads | insights | [`InsightsRequest`] | [`InsightBatch`] |
//!
//! Every operation issues exactly one upstream call and reads only the first
//! page of results.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{
    Ad, AdSet, DatePreset, Insight, InsightLevel, Order, Product, Timestamp, ValidationError,
};

/// Default page size for list operations.
pub const DEFAULT_LIMIT: u32 = 50;

/// Default lookback window, in days, for orders and insights.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Upstream platform identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upstream {
    Shopify,
    Facebook,
}

impl Upstream {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::Facebook => "facebook",
        }
    }
}

impl Display for Upstream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health state reported by an adapter health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Runtime upstream health snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub upstream: Upstream,
    pub state: HealthState,
    pub message: Option<String>,
}

impl HealthStatus {
    pub const fn healthy(upstream: Upstream) -> Self {
        Self {
            upstream,
            state: HealthState::Healthy,
            message: None,
        }
    }

    pub fn unhealthy(upstream: Upstream, message: impl Into<String>) -> Self {
        Self {
            upstream,
            state: HealthState::Unhealthy,
            message: Some(message.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.state == HealthState::Healthy
    }
}

/// Adapter-level error classification.
///
/// The HTTP surface maps every kind to the same server error; the kind exists
/// for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Authentication,
    Unavailable,
    RateLimited,
    InvalidRequest,
    MalformedPayload,
    Internal,
}

/// Structured adapter error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Authentication, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::RateLimited, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidRequest, message)
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::MalformedPayload, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Authentication => "source.authentication",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
            SourceErrorKind::Internal => "source.internal",
        }
    }

    /// Classifies a non-success upstream status.
    pub fn from_status(upstream: Upstream, status: u16, detail: &str) -> Self {
        let message = if detail.is_empty() {
            format!("{upstream} upstream returned status {status}")
        } else {
            format!("{upstream} upstream returned status {status}: {detail}")
        };
        match status {
            401 | 403 => Self::authentication(message),
            429 => Self::rate_limited(message),
            400..=499 => Self::invalid_request(message),
            _ => Self::unavailable(message),
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::InvalidInsightLevel { .. } => Self::invalid_request(error.to_string()),
            _ => Self::malformed_payload(error.to_string()),
        }
    }
}

/// Request payload for product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductsRequest {
    pub limit: u32,
}

impl ProductsRequest {
    pub const fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl Default for ProductsRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Request payload for order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersRequest {
    pub days: i64,
    pub limit: u32,
}

impl OrdersRequest {
    pub const fn new(days: i64, limit: u32) -> Self {
        Self { days, limit }
    }

    /// Earliest creation time included, relative to `now`. Negative `days`
    /// yield a time after `now`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the lookback leaves the
    /// representable date range.
    pub fn created_at_min(self, now: Timestamp) -> Result<Timestamp, SourceError> {
        now.days_before(self.days).ok_or_else(|| {
            SourceError::invalid_request(format!(
                "order lookback of {} days is out of range",
                self.days
            ))
        })
    }
}

impl Default for OrdersRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_DAYS, DEFAULT_LIMIT)
    }
}

/// Request payload for ad set listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdSetsRequest {
    pub limit: u32,
}

impl AdSetsRequest {
    pub const fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl Default for AdSetsRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Request payload for ad listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdsRequest {
    pub limit: u32,
}

impl AdsRequest {
    pub const fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl Default for AdsRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Request payload for insights reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightsRequest {
    pub days: i64,
    pub level: InsightLevel,
}

impl InsightsRequest {
    pub const fn new(days: i64, level: InsightLevel) -> Self {
        Self { days, level }
    }

    /// Parses the level from its wire name.
    pub fn parse(days: i64, level: &str) -> Result<Self, SourceError> {
        Ok(Self::new(days, level.parse()?))
    }

    pub const fn date_preset(self) -> DatePreset {
        DatePreset::from_days(self.days)
    }
}

impl Default for InsightsRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_DAYS, InsightLevel::Account)
    }
}

/// Normalized product batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBatch {
    pub products: Vec<Product>,
}

/// Normalized order batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBatch {
    pub orders: Vec<Order>,
}

/// Normalized ad set batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSetBatch {
    pub adsets: Vec<AdSet>,
}

/// Normalized ad batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdBatch {
    pub ads: Vec<Ad>,
}

/// Normalized insights batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBatch {
    pub insights: Vec<Insight>,
}

/// Boxed future returned by adapter operations.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Storefront adapter contract.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request for the lifetime of the process.
pub trait CommerceSource: Send + Sync {
    /// Lists at most `req.limit` products in upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if no session is established, the upstream call
    /// fails, or the payload cannot be normalized.
    fn products<'a>(&'a self, req: ProductsRequest) -> SourceFuture<'a, ProductBatch>;

    /// Lists at most `req.limit` orders created within the last `req.days` days.
    ///
    /// # Errors
    ///
    /// Same conditions as [`products`](CommerceSource::products).
    fn orders<'a>(&'a self, req: OrdersRequest) -> SourceFuture<'a, OrderBatch>;

    /// Checks the upstream. Never fails; problems are reported in the status.
    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>>;
}

/// Advertising adapter contract, bound to a single ad account.
pub trait AdsSource: Send + Sync {
    /// Lists at most `req.limit` ad sets.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the upstream call fails or a timestamp does
    /// not match the Graph format.
    fn ad_sets<'a>(&'a self, req: AdSetsRequest) -> SourceFuture<'a, AdSetBatch>;

    /// Lists at most `req.limit` ads.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ad_sets`](AdsSource::ad_sets).
    fn ads<'a>(&'a self, req: AdsRequest) -> SourceFuture<'a, AdBatch>;

    /// Fetches daily insight rows at `req.level` for the preset derived from
    /// `req.days`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the upstream call fails or a row is missing a
    /// required metric.
    fn insights<'a>(&'a self, req: InsightsRequest) -> SourceFuture<'a, InsightBatch>;

    /// Checks the upstream. Never fails; problems are reported in the status.
    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>>;
}
