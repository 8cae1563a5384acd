//! Shared fixtures for behavior tests.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use adextract_core::{
    FacebookAdsAdapter, FacebookConfig, HttpClient, HttpError, HttpRequest, HttpResponse,
    ShopifyAdapter, ShopifyConfig,
};
use serde_json::{json, Value};

/// Replays canned responses keyed by the final path segment of the request.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path_suffix: &str, body: Value) -> Self {
        self.routes.push((
            path_suffix.to_owned(),
            Ok(HttpResponse::ok_json(body.to_string())),
        ));
        self
    }

    pub fn respond_status(mut self, path_suffix: &str, status: u16, body: Value) -> Self {
        self.routes.push((
            path_suffix.to_owned(),
            Ok(HttpResponse::with_status(status, body.to_string())),
        ));
        self
    }

    pub fn fail_transport(mut self, path_suffix: &str, message: &str) -> Self {
        self.routes
            .push((path_suffix.to_owned(), Err(HttpError::new(message))));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .iter()
            .find(|(suffix, _)| request.path().ends_with(suffix.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "{}")));
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

pub fn shopify_config() -> ShopifyConfig {
    ShopifyConfig {
        shop_url: String::from("demo-store.myshopify.com"),
        api_key: String::from("key"),
        api_secret: String::from("shpat_secret"),
        api_version: String::from("2024-01"),
    }
}

pub fn facebook_config() -> FacebookConfig {
    FacebookConfig {
        app_id: String::from("app-1"),
        app_secret: String::from("app-secret"),
        access_token: String::from("EAAB-token"),
        ad_account_id: String::from("1234567890"),
        graph_version: String::from("v19.0"),
    }
}

pub fn shopify(client: Arc<ScriptedHttpClient>) -> ShopifyAdapter {
    let mut adapter = ShopifyAdapter::new(shopify_config(), client);
    adapter
        .authenticate()
        .expect("fixture credentials are complete");
    adapter
}

pub fn facebook(client: Arc<ScriptedHttpClient>) -> FacebookAdsAdapter {
    FacebookAdsAdapter::new(&facebook_config(), client).expect("fixture credentials are complete")
}

pub fn product(id: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "product_type": "Apparel",
        "created_at": "2024-01-10T08:00:00-05:00",
        "updated_at": "2024-01-11T08:00:00-05:00",
        "variants": [{
            "id": id * 100,
            "product_id": id,
            "title": "Default Title",
            "price": "25.00",
            "sku": format!("SKU-{id}"),
            "inventory_quantity": 3
        }]
    })
}

pub fn products_page(count: i64) -> Value {
    json!({ "products": (1..=count).map(product).collect::<Vec<_>>() })
}

pub fn order(id: i64) -> Value {
    json!({
        "id": id,
        "order_number": 1000 + id,
        "customer": { "id": 7, "email": "customer@example.com" },
        "created_at": "2024-02-01T10:00:00+00:00",
        "total_price": "50.00",
        "line_items": [{ "id": 1, "title": "Product 1", "quantity": 2 }]
    })
}

pub fn orders_page(count: i64) -> Value {
    json!({ "orders": (1..=count).map(order).collect::<Vec<_>>() })
}

pub fn ad_set(id: i64) -> Value {
    json!({
        "id": id.to_string(),
        "name": format!("Ad set {id}"),
        "campaign_id": "c-1",
        "daily_budget": "2000",
        "start_time": "2024-01-15T10:30:00+0000",
        "targeting": { "age_min": 18 }
    })
}

pub fn ad_sets_page(count: i64) -> Value {
    json!({ "data": (1..=count).map(ad_set).collect::<Vec<_>>(), "paging": { "cursors": {} } })
}

pub fn ad(id: i64) -> Value {
    json!({
        "id": id.to_string(),
        "name": format!("Ad {id}"),
        "adset_id": "1",
        "status": "ACTIVE",
        "created_time": "2024-01-16T09:00:00+0000"
    })
}

pub fn ads_page(count: i64) -> Value {
    json!({ "data": (1..=count).map(ad).collect::<Vec<_>>() })
}

pub fn insights_page() -> Value {
    json!({
        "data": [
            {
                "date_start": "2024-01-14",
                "date_stop": "2024-01-14",
                "campaign_id": "c-1",
                "adset_id": "as-1",
                "ad_id": "ad-1",
                "impressions": "1000",
                "clicks": "25",
                "spend": "10.00",
                "cpc": "0.40",
                "ctr": "2.5"
            },
            {
                "date_start": "2024-01-15",
                "date_stop": "2024-01-15",
                "campaign_id": "c-1",
                "adset_id": "as-1",
                "ad_id": "ad-1",
                "impressions": "800",
                "clicks": "0",
                "spend": "8.00"
            }
        ]
    })
}
