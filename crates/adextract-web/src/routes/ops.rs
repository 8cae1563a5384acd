//! Operational endpoints.

use axum::extract::State;
use axum::Json;

use crate::dto::{HealthResponse, MessageResponse};
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Shopify & Facebook Ads Data Extractor API";

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: String::from(WELCOME_MESSAGE),
    })
}

/// Checks both upstreams. Always 200; state is reported in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let commerce = state.commerce.health().await;
    let ads = state.ads.health().await;

    if !(commerce.is_healthy() && ads.is_healthy()) {
        tracing::warn!(
            shopify = ?commerce.state,
            facebook = ?ads.state,
            "upstream health degraded"
        );
    }

    Json(HealthResponse::from_statuses(vec![commerce, ads]))
}
