//! Integration tests for the HTTP surface.
//!
//! The router runs against real adapters whose transport replays canned
//! upstream payloads, so these tests cover routing, query defaults, response
//! shapes, and the error boundary end to end.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use adextract_core::{
    FacebookAdsAdapter, FacebookConfig, HttpClient, HttpError, HttpRequest, HttpResponse,
    ShopifyAdapter, ShopifyConfig, Timestamp,
};
use adextract_web::{build_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Debug, Default)]
struct ScriptedHttpClient {
    routes: Vec<(&'static str, HttpResponse)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn respond(mut self, suffix: &'static str, body: Value) -> Self {
        self.routes.push((suffix, HttpResponse::ok_json(body.to_string())));
        self
    }

    fn respond_status(mut self, suffix: &'static str, status: u16, body: Value) -> Self {
        self.routes
            .push((suffix, HttpResponse::with_status(status, body.to_string())));
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }

    fn called_paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| request.path().to_owned())
            .collect()
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
            .find(|(suffix, _)| request.path().ends_with(suffix))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| HttpResponse::with_status(404, "{}"));
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);
        Box::pin(async move { Ok(response) })
    }
}

fn test_app(client: Arc<ScriptedHttpClient>) -> Router {
    let mut shopify = ShopifyAdapter::new(
        ShopifyConfig {
            shop_url: String::from("demo-store.myshopify.com"),
            api_key: String::from("key"),
            api_secret: String::from("shpat_secret"),
            api_version: String::from("2024-01"),
        },
        client.clone(),
    );
    shopify.authenticate().expect("credentials are complete");

    let facebook = FacebookAdsAdapter::new(
        &FacebookConfig {
            app_id: String::from("app-1"),
            app_secret: String::from("app-secret"),
            access_token: String::from("EAAB-token"),
            ad_account_id: String::from("42"),
            graph_version: String::from("v19.0"),
        },
        client,
    )
    .expect("credentials are complete");

    build_router(AppState::new(Arc::new(shopify), Arc::new(facebook)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn products(count: i64) -> Value {
    let products: Vec<Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Product {id}"),
                "product_type": "Apparel",
                "created_at": "2024-01-10T08:00:00-05:00",
                "updated_at": "2024-01-11T08:00:00-05:00",
                "variants": [{
                    "id": id * 10,
                    "product_id": id,
                    "title": "Default Title",
                    "price": "25.00",
                    "sku": null
                }]
            })
        })
        .collect();
    json!({ "products": products })
}

fn orders() -> Value {
    json!({
        "orders": [{
            "id": 1,
            "order_number": 1001,
            "customer": null,
            "created_at": "2024-02-01T10:00:00Z",
            "total_price": "50.00",
            "line_items": []
        }]
    })
}

fn ad_sets() -> Value {
    json!({
        "data": [{
            "id": "as-1",
            "name": "Prospecting",
            "campaign_id": "c-1",
            "start_time": "2024-01-15T10:30:00+0000"
        }]
    })
}

fn ads() -> Value {
    json!({
        "data": [{
            "id": "ad-1",
            "name": "Carousel",
            "adset_id": "as-1",
            "status": "PAUSED",
            "created_time": "2024-01-16T09:00:00+0000"
        }]
    })
}

fn insights() -> Value {
    json!({
        "data": [{
            "date_start": "2024-01-14",
            "date_stop": "2024-01-14",
            "campaign_id": "c-1",
            "adset_id": "as-1",
            "impressions": "1000",
            "clicks": "25",
            "spend": "10.00",
            "cpc": "0.40",
            "ctr": "2.5"
        }]
    })
}

fn all_upstreams() -> ScriptedHttpClient {
    ScriptedHttpClient::default()
        .respond("products.json", products(3))
        .respond("orders.json", orders())
        .respond("/adsets", ad_sets())
        .respond("/ads", ads())
        .respond("/insights", insights())
}

// =============================================================================
// Root and health
// =============================================================================

#[tokio::test]
async fn root_returns_welcome_message() {
    let app = test_app(Arc::new(ScriptedHttpClient::default()));

    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Welcome to the Shopify & Facebook Ads Data Extractor API" })
    );
}

#[tokio::test]
async fn health_reports_each_upstream_and_stays_ok() {
    let client = ScriptedHttpClient::default()
        .respond("shop.json", json!({ "shop": { "id": 1 } }))
        .respond_status(
            "act_42",
            401,
            json!({ "error": { "message": "Session has expired" } }),
        );
    let app = test_app(Arc::new(client));

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["upstreams"][0]["upstream"], "shopify");
    assert_eq!(body["upstreams"][0]["state"], "healthy");
    assert_eq!(body["upstreams"][1]["state"], "unhealthy");
    assert!(body["upstreams"][1]["message"]
        .as_str()
        .is_some_and(|message| message.contains("Session has expired")));
}

// =============================================================================
// Single-endpoint shapes
// =============================================================================

#[tokio::test]
async fn products_limit_truncates_and_orders_is_null() {
    let client = ScriptedHttpClient::default().respond("products.json", products(5));
    let app = test_app(Arc::new(client));

    let (status, body) = get(app, "/api/v1/shopify/products?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["orders"], Value::Null);
    assert_eq!(body["products"][0]["variants"][0]["inventory_quantity"], 0);
    assert_eq!(body["products"][0]["created_at"], "2024-01-10T08:00:00-05:00");
}

#[tokio::test]
async fn orders_endpoint_applies_defaults() {
    let client = Arc::new(ScriptedHttpClient::default().respond("orders.json", orders()));
    let app = test_app(client.clone());

    let (status, body) = get(app, "/api/v1/shopify/orders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], Value::Null);
    assert_eq!(body["orders"][0]["customer"], Value::Null);
    assert_eq!(body["orders"][0]["order_number"], 1001);
    assert_eq!(client.called_paths().len(), 1);
}

#[tokio::test]
async fn ad_sets_endpoint_serializes_missing_optionals_as_null() {
    let app = test_app(Arc::new(
        ScriptedHttpClient::default().respond("/adsets", ad_sets()),
    ));

    let (status, body) = get(app, "/api/v1/facebook/adsets?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ads"], Value::Null);
    assert_eq!(body["insights"], Value::Null);
    let adset = &body["adsets"][0];
    assert_eq!(adset["start_time"], "2024-01-15T10:30:00Z");
    assert_eq!(adset["end_time"], Value::Null);
    assert_eq!(adset["daily_budget"], Value::Null);
    assert_eq!(adset["targeting"], Value::Null);
}

#[tokio::test]
async fn negative_insights_days_use_yesterday_preset() {
    let client = Arc::new(ScriptedHttpClient::default().respond("/insights", insights()));
    let app = test_app(client.clone());

    let (status, body) = get(app, "/api/v1/facebook/insights?days=-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["insights"].as_array().map(Vec::len), Some(1));
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].query_param("date_preset").as_deref(),
        Some("yesterday")
    );
}

#[tokio::test]
async fn negative_order_days_send_a_future_lookback() {
    let client = Arc::new(ScriptedHttpClient::default().respond("orders.json", orders()));
    let app = test_app(client.clone());

    let before = Timestamp::now();
    let (status, body) = get(app, "/api/v1/shopify/orders?days=-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"].as_array().map(Vec::len), Some(1));
    let sent = client.requests()[0]
        .query_param("created_at_min")
        .expect("lookback filter is sent");
    let created_at_min = Timestamp::parse_rfc3339(&sent).expect("RFC3339 lookback");
    assert!(created_at_min > before);
}

#[tokio::test]
async fn insights_at_campaign_level_keep_only_campaign_id() {
    let app = test_app(Arc::new(
        ScriptedHttpClient::default().respond("/insights", insights()),
    ));

    let (status, body) = get(app, "/api/v1/facebook/insights?days=7&level=campaign").await;

    assert_eq!(status, StatusCode::OK);
    let row = &body["insights"][0];
    assert_eq!(row["campaign_id"], "c-1");
    assert_eq!(row["adset_id"], Value::Null);
    assert_eq!(row["ad_id"], Value::Null);
    assert_eq!(body["adsets"], Value::Null);
}

// =============================================================================
// Error boundary
// =============================================================================

#[tokio::test]
async fn unknown_insights_level_is_a_server_error_with_detail() {
    let client = Arc::new(ScriptedHttpClient::default().respond("/insights", insights()));
    let app = test_app(client.clone());

    let (status, body) = get(app, "/api/v1/facebook/insights?level=creative").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("Error fetching Facebook insights: "));
    assert!(detail.contains("creative"));
    assert!(client.called_paths().is_empty());
}

#[tokio::test]
async fn upstream_rejection_surfaces_as_detail() {
    let client = ScriptedHttpClient::default().respond_status(
        "products.json",
        401,
        json!({ "errors": "[API] Invalid API key or access token" }),
    );
    let app = test_app(Arc::new(client));

    let (status, body) = get(app, "/api/v1/shopify/products").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.as_object().map(|object| object.len()), Some(1));
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("Error fetching Shopify products: "));
    assert!(detail.contains("Invalid API key"));
}

#[tokio::test]
async fn malformed_graph_timestamp_is_a_server_error() {
    let client = ScriptedHttpClient::default().respond(
        "/ads",
        json!({ "data": [{
            "id": "ad-1",
            "name": "Carousel",
            "adset_id": "as-1",
            "status": "ACTIVE",
            "created_time": "16/01/2024"
        }] }),
    );
    let app = test_app(Arc::new(client));

    let (status, body) = get(app, "/api/v1/facebook/ads").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.starts_with("Error fetching Facebook ads: ")));
}

#[tokio::test]
async fn out_of_range_order_lookback_is_a_server_error() {
    let client = Arc::new(all_upstreams());
    let app = test_app(client.clone());

    let (status, body) = get(app, "/api/v1/shopify/orders?days=4294967295").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().expect("detail is a string");
    assert!(detail.starts_with("Error fetching Shopify orders: "));
    assert!(detail.contains("out of range"));
    assert!(client.called_paths().is_empty());
}

#[tokio::test]
async fn out_of_range_order_lookback_fails_combined_data() {
    let client = Arc::new(all_upstreams());
    let app = test_app(client.clone());

    let (status, body) = get(app, "/api/v1/combined-data?order_days=9223372036854775807").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.starts_with("Error fetching combined data: ")));
    assert_eq!(client.called_paths().len(), 1);
}

#[tokio::test]
async fn non_numeric_limit_is_rejected_before_any_upstream_call() {
    let client = Arc::new(all_upstreams());
    let app = test_app(client.clone());

    let (status, _) = get(app, "/api/v1/shopify/products?limit=many").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(client.called_paths().is_empty());
}

// =============================================================================
// Combined data
// =============================================================================

#[tokio::test]
async fn combined_data_merges_all_five_fetches_in_order() {
    let client = Arc::new(all_upstreams());
    let app = test_app(client.clone());

    let (status, body) = get(
        app,
        "/api/v1/combined-data?product_limit=2&fb_insight_level=adset&fb_insight_days=7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shopify"]["products"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["shopify"]["orders"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["facebook"]["adsets"][0]["id"], "as-1");
    assert_eq!(body["facebook"]["ads"][0]["status"], "PAUSED");
    assert_eq!(body["facebook"]["insights"][0]["adset_id"], "as-1");
    assert_eq!(body["facebook"]["insights"][0]["campaign_id"], Value::Null);

    let paths = client.called_paths();
    let order: Vec<&str> = paths
        .iter()
        .filter_map(|path| path.rsplit('/').next())
        .collect();
    assert_eq!(
        order,
        vec!["products.json", "orders.json", "adsets", "ads", "insights"]
    );
}

#[tokio::test]
async fn combined_data_fails_whole_when_insights_fail() {
    let client = Arc::new(
        ScriptedHttpClient::default()
            .respond("products.json", products(1))
            .respond("orders.json", orders())
            .respond("/adsets", ad_sets())
            .respond("/ads", ads())
            .respond_status(
                "/insights",
                500,
                json!({ "error": { "message": "An unexpected error has occurred." } }),
            ),
    );
    let app = test_app(client.clone());

    let (status, body) = get(app, "/api/v1/combined-data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.as_object().map(|object| object.len()), Some(1));
    assert!(body.get("shopify").is_none());
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.starts_with("Error fetching combined data: ")));
    assert_eq!(client.called_paths().len(), 5);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app(Arc::new(ScriptedHttpClient::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://dashboard.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
