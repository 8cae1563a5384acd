//! Aggregation endpoint.

use adextract_core::{
    AdSetsRequest, AdsRequest, InsightsRequest, OrdersRequest, ProductsRequest,
};
use axum::extract::{Query, State};
use axum::Json;
use tracing::info;

use crate::dto::{CombinedDataQuery, CombinedDataResponse, FacebookDataResponse, ShopifyDataResponse};
use crate::error::{ApiError, Operation, Result};
use crate::state::AppState;

/// Runs the five fetches one after another and fails as a whole on the first
/// error; no partial body is ever returned.
pub async fn combined_data(
    State(state): State<AppState>,
    Query(query): Query<CombinedDataQuery>,
) -> Result<Json<CombinedDataResponse>> {
    info!(endpoint = "combined-data", "handling request");
    let fail = ApiError::upstream;

    let insights_request = InsightsRequest::parse(query.fb_insight_days, &query.fb_insight_level)
        .map_err(fail(Operation::CombinedData))?;

    let products = state
        .commerce
        .products(ProductsRequest::new(query.product_limit))
        .await
        .map_err(fail(Operation::CombinedData))?;
    let orders = state
        .commerce
        .orders(OrdersRequest::new(query.order_days, query.order_limit))
        .await
        .map_err(fail(Operation::CombinedData))?;
    let adsets = state
        .ads
        .ad_sets(AdSetsRequest::new(query.fb_adset_limit))
        .await
        .map_err(fail(Operation::CombinedData))?;
    let ads = state
        .ads
        .ads(AdsRequest::new(query.fb_ad_limit))
        .await
        .map_err(fail(Operation::CombinedData))?;
    let insights = state
        .ads
        .insights(insights_request)
        .await
        .map_err(fail(Operation::CombinedData))?;

    info!(
        products = products.products.len(),
        orders = orders.orders.len(),
        adsets = adsets.adsets.len(),
        ads = ads.ads.len(),
        insights = insights.insights.len(),
        "combined data assembled"
    );

    Ok(Json(CombinedDataResponse {
        shopify: ShopifyDataResponse {
            products: Some(products.products),
            orders: Some(orders.orders),
        },
        facebook: FacebookDataResponse {
            adsets: Some(adsets.adsets),
            ads: Some(ads.ads),
            insights: Some(insights.insights),
        },
    }))
}
