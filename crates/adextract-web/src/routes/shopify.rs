//! Storefront endpoints.

use adextract_core::{OrdersRequest, ProductsRequest};
use axum::extract::{Query, State};
use axum::Json;
use tracing::info;

use crate::dto::{LimitQuery, OrdersQuery, ShopifyDataResponse};
use crate::error::{ApiError, Operation, Result};
use crate::state::AppState;

pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ShopifyDataResponse>> {
    info!(endpoint = "shopify/products", limit = query.limit, "handling request");

    let batch = state
        .commerce
        .products(ProductsRequest::new(query.limit))
        .await
        .map_err(ApiError::upstream(Operation::ShopifyProducts))?;

    Ok(Json(ShopifyDataResponse {
        products: Some(batch.products),
        orders: None,
    }))
}

pub async fn orders(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<ShopifyDataResponse>> {
    info!(
        endpoint = "shopify/orders",
        days = query.days,
        limit = query.limit,
        "handling request"
    );

    let batch = state
        .commerce
        .orders(OrdersRequest::new(query.days, query.limit))
        .await
        .map_err(ApiError::upstream(Operation::ShopifyOrders))?;

    Ok(Json(ShopifyDataResponse {
        products: None,
        orders: Some(batch.orders),
    }))
}
