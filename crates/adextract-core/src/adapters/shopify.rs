use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ShopifyConfig;
use crate::data_source::{
    CommerceSource, HealthStatus, OrderBatch, OrdersRequest, ProductBatch, ProductsRequest,
    SourceError, SourceFuture, Upstream,
};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{JsonObject, Order, Product, ProductVariant, Timestamp};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Activated Admin API session: resolved base URL plus auth header.
#[derive(Debug, Clone)]
struct ShopifySession {
    base_url: String,
    auth: HttpAuth,
}

/// Shopify Admin REST adapter.
///
/// Built once per process. [`authenticate`](ShopifyAdapter::authenticate) must
/// succeed before any fetch; fetching without a session fails with an
/// authentication error.
#[derive(Clone)]
pub struct ShopifyAdapter {
    http_client: Arc<dyn HttpClient>,
    config: ShopifyConfig,
    timeout_ms: u64,
    session: Option<ShopifySession>,
}

impl ShopifyAdapter {
    pub fn new(config: ShopifyConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            config,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            session: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Establishes the Admin API session from the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the shop URL, API key, API secret
    /// or API version is empty.
    pub fn authenticate(&mut self) -> Result<(), SourceError> {
        let config = &self.config;
        let missing = [
            ("shop url", config.shop_url.trim()),
            ("api key", config.api_key.trim()),
            ("api secret", config.api_secret.trim()),
            ("api version", config.api_version.trim()),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());

        if let Some((name, _)) = missing {
            return Err(SourceError::authentication(format!(
                "shopify {name} is not configured"
            )));
        }

        let base_url = format!(
            "{}/admin/api/{}",
            normalize_shop_url(&config.shop_url),
            config.api_version.trim()
        );
        info!(upstream = "shopify", base_url = %base_url, "shopify session activated");

        self.session = Some(ShopifySession {
            base_url,
            auth: HttpAuth::Header {
                name: String::from(ACCESS_TOKEN_HEADER),
                value: config.api_secret.trim().to_owned(),
            },
        });
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&ShopifySession, SourceError> {
        self.session.as_ref().ok_or_else(|| {
            SourceError::authentication(
                "shopify session is not established; call authenticate() first",
            )
        })
    }

    fn build_request(&self, session: &ShopifySession, resource: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/{resource}", session.base_url))
            .with_auth(&session.auth)
            .with_timeout_ms(self.timeout_ms)
    }

    async fn fetch<T>(&self, resource: &str, request: HttpRequest) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        debug!(upstream = "shopify", path = %request.path(), "issuing upstream request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("shopify transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            let detail = error_detail(&response.body);
            warn!(
                upstream = "shopify",
                resource,
                status = response.status,
                "upstream returned an error status"
            );
            return Err(SourceError::from_status(
                Upstream::Shopify,
                response.status,
                &detail,
            ));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            SourceError::malformed_payload(format!(
                "failed to parse shopify {resource} response: {error}"
            ))
        })
    }
}

impl CommerceSource for ShopifyAdapter {
    fn products<'a>(&'a self, req: ProductsRequest) -> SourceFuture<'a, ProductBatch> {
        Box::pin(async move {
            let session = self.session()?;
            let request = self
                .build_request(session, "products.json")
                .with_query("limit", req.limit.to_string());

            let payload: ShopifyProductsPayload = self.fetch("products", request).await?;
            let products = payload
                .products
                .into_iter()
                .take(req.limit as usize)
                .map(normalize_product)
                .collect::<Result<Vec<_>, _>>()?;

            info!(upstream = "shopify", count = products.len(), "fetched products");
            Ok(ProductBatch { products })
        })
    }

    fn orders<'a>(&'a self, req: OrdersRequest) -> SourceFuture<'a, OrderBatch> {
        Box::pin(async move {
            let session = self.session()?;
            let created_at_min = req
                .created_at_min(Timestamp::now())?
                .format_rfc3339()
                .map_err(|error| {
                    SourceError::internal(format!("failed to format created_at_min: {error}"))
                })?;
            let request = self
                .build_request(session, "orders.json")
                .with_query("created_at_min", created_at_min)
                .with_query("limit", req.limit.to_string());

            let payload: ShopifyOrdersPayload = self.fetch("orders", request).await?;
            let orders = payload
                .orders
                .into_iter()
                .take(req.limit as usize)
                .map(normalize_order)
                .collect::<Result<Vec<_>, _>>()?;

            info!(
                upstream = "shopify",
                count = orders.len(),
                days = req.days,
                "fetched orders"
            );
            Ok(OrderBatch { orders })
        })
    }

    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>> {
        Box::pin(async move {
            let session = match self.session() {
                Ok(session) => session,
                Err(error) => return HealthStatus::unhealthy(Upstream::Shopify, error.message()),
            };
            let request = self.build_request(session, "shop.json");

            match self.fetch::<serde_json::Value>("shop", request).await {
                Ok(_) => HealthStatus::healthy(Upstream::Shopify),
                Err(error) => HealthStatus::unhealthy(Upstream::Shopify, error.message()),
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct ShopifyProductsPayload {
    products: Vec<ShopifyProductPayload>,
}

#[derive(Debug, Deserialize)]
struct ShopifyProductPayload {
    id: i64,
    title: String,
    #[serde(default)]
    product_type: Option<String>,
    created_at: String,
    updated_at: String,
    variants: Vec<ShopifyVariantPayload>,
}

#[derive(Debug, Deserialize)]
struct ShopifyVariantPayload {
    id: i64,
    product_id: i64,
    title: String,
    price: String,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    inventory_quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ShopifyOrdersPayload {
    orders: Vec<ShopifyOrderPayload>,
}

#[derive(Debug, Deserialize)]
struct ShopifyOrderPayload {
    id: i64,
    order_number: i64,
    #[serde(default)]
    customer: Option<JsonObject>,
    created_at: String,
    total_price: String,
    line_items: Vec<JsonObject>,
}

fn normalize_product(payload: ShopifyProductPayload) -> Result<Product, SourceError> {
    Ok(Product {
        id: payload.id,
        title: payload.title,
        product_type: payload.product_type,
        created_at: Timestamp::parse_rfc3339(&payload.created_at)?,
        updated_at: Timestamp::parse_rfc3339(&payload.updated_at)?,
        variants: payload.variants.into_iter().map(normalize_variant).collect(),
    })
}

fn normalize_variant(payload: ShopifyVariantPayload) -> ProductVariant {
    ProductVariant {
        id: payload.id,
        product_id: payload.product_id,
        title: payload.title,
        price: payload.price,
        sku: payload.sku,
        inventory_quantity: payload.inventory_quantity.unwrap_or(0),
    }
}

fn normalize_order(payload: ShopifyOrderPayload) -> Result<Order, SourceError> {
    Ok(Order {
        id: payload.id,
        order_number: payload.order_number,
        customer: payload.customer,
        created_at: Timestamp::parse_rfc3339(&payload.created_at)?,
        total_price: payload.total_price,
        line_items: payload.line_items,
    })
}

fn normalize_shop_url(shop_url: &str) -> String {
    let trimmed = shop_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Extracts the `errors` member Shopify puts in error bodies.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("errors") {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        _ => String::new(),
    }
}
