//! Error boundary for the HTTP surface and the server binary.

use std::net::SocketAddr;

use adextract_core::{ConfigError, SourceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Endpoint that produced an upstream failure. Its context prefixes the
/// `detail` text returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ShopifyProducts,
    ShopifyOrders,
    FacebookAdSets,
    FacebookAds,
    FacebookInsights,
    CombinedData,
}

impl Operation {
    pub const fn context(self) -> &'static str {
        match self {
            Self::ShopifyProducts => "Error fetching Shopify products",
            Self::ShopifyOrders => "Error fetching Shopify orders",
            Self::FacebookAdSets => "Error fetching Facebook ad sets",
            Self::FacebookAds => "Error fetching Facebook ads",
            Self::FacebookInsights => "Error fetching Facebook insights",
            Self::CombinedData => "Error fetching combined data",
        }
    }
}

/// API errors. Every variant renders as HTTP 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context}: {source}", context = .operation.context())]
    Upstream {
        operation: Operation,
        source: SourceError,
    },
}

impl ApiError {
    pub fn upstream(operation: Operation) -> impl FnOnce(SourceError) -> Self {
        move |source| Self::Upstream { operation, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Upstream { source, .. } => source.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = ErrorResponse {
            detail: self.to_string(),
        };

        tracing::warn!(
            error_code = self.code(),
            error_message = %body.detail,
            status = %status,
            "API error"
        );

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type Result<T> = std::result::Result<T, ApiError>;

/// Startup and serve failures of the server binary, mapped to exit codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("upstream authentication failed: {0}")]
    Authentication(#[from] SourceError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Authentication(_) => 3,
            Self::Bind { .. } => 10,
            Self::Serve(_) => 11,
        }
    }
}
