//! API routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | [`ops::root`] |
//! | GET | `/health` | [`ops::health`] |
//! | GET | `/api/v1/shopify/products` | [`shopify::products`] |
//! | GET | `/api/v1/shopify/orders` | [`shopify::orders`] |
//! | GET | `/api/v1/facebook/adsets` | [`facebook::ad_sets`] |
//! | GET | `/api/v1/facebook/ads` | [`facebook::ads`] |
//! | GET | `/api/v1/facebook/insights` | [`facebook::insights`] |
//! | GET | `/api/v1/combined-data` | [`combined::combined_data`] |

pub mod combined;
pub mod facebook;
pub mod ops;
pub mod shopify;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Prefix for the data endpoints.
pub const API_PREFIX: &str = "/api/v1";

/// Build the complete router with permissive CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/shopify/products", get(shopify::products))
        .route("/shopify/orders", get(shopify::orders))
        .route("/facebook/adsets", get(facebook::ad_sets))
        .route("/facebook/ads", get(facebook::ads))
        .route("/facebook/insights", get(facebook::insights))
        .route("/combined-data", get(combined::combined_data));

    Router::new()
        .route("/", get(ops::root))
        .route("/health", get(ops::health))
        .nest(API_PREFIX, api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
