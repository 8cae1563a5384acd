//! Ads endpoints.

use adextract_core::{AdSetsRequest, AdsRequest, InsightsRequest};
use axum::extract::{Query, State};
use axum::Json;
use tracing::info;

use crate::dto::{FacebookDataResponse, InsightsQuery, LimitQuery};
use crate::error::{ApiError, Operation, Result};
use crate::state::AppState;

pub async fn ad_sets(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<FacebookDataResponse>> {
    info!(endpoint = "facebook/adsets", limit = query.limit, "handling request");

    let batch = state
        .ads
        .ad_sets(AdSetsRequest::new(query.limit))
        .await
        .map_err(ApiError::upstream(Operation::FacebookAdSets))?;

    Ok(Json(FacebookDataResponse {
        adsets: Some(batch.adsets),
        ..FacebookDataResponse::default()
    }))
}

pub async fn ads(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<FacebookDataResponse>> {
    info!(endpoint = "facebook/ads", limit = query.limit, "handling request");

    let batch = state
        .ads
        .ads(AdsRequest::new(query.limit))
        .await
        .map_err(ApiError::upstream(Operation::FacebookAds))?;

    Ok(Json(FacebookDataResponse {
        ads: Some(batch.ads),
        ..FacebookDataResponse::default()
    }))
}

pub async fn insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<FacebookDataResponse>> {
    info!(
        endpoint = "facebook/insights",
        days = query.days,
        level = %query.level,
        "handling request"
    );

    let request = InsightsRequest::parse(query.days, &query.level)
        .map_err(ApiError::upstream(Operation::FacebookInsights))?;
    let batch = state
        .ads
        .insights(request)
        .await
        .map_err(ApiError::upstream(Operation::FacebookInsights))?;

    Ok(Json(FacebookDataResponse {
        insights: Some(batch.insights),
        ..FacebookDataResponse::default()
    }))
}
