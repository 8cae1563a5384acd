use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, info, warn};

use crate::config::FacebookConfig;
use crate::data_source::{
    AdBatch, AdSetBatch, AdSetsRequest, AdsRequest, AdsSource, HealthStatus, InsightBatch,
    InsightsRequest, SourceError, SourceFuture, Upstream,
};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{Ad, AdSet, Insight, InsightLevel, JsonObject, Timestamp};

type HmacSha256 = Hmac<Sha256>;

const GRAPH_BASE_URL: &str = "https://graph.facebook.com";
const AD_SET_FIELDS: &str = "id,name,campaign_id,daily_budget,start_time,end_time,targeting";
const AD_FIELDS: &str = "id,name,adset_id,status,created_time";
const INSIGHT_FIELDS: &str = "date_start,date_stop,impressions,clicks,spend,cpc,ctr";

/// Facebook Graph Marketing API adapter bound to a single ad account.
#[derive(Clone)]
pub struct FacebookAdsAdapter {
    http_client: Arc<dyn HttpClient>,
    account_url: String,
    access_token: String,
    appsecret_proof: String,
    timeout_ms: u64,
}

impl FacebookAdsAdapter {
    /// Binds the adapter to the configured ad account.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the access token, app secret or
    /// ad account id is empty.
    pub fn new(config: &FacebookConfig, http_client: Arc<dyn HttpClient>) -> Result<Self, SourceError> {
        let access_token = config.access_token.trim();
        let app_secret = config.app_secret.trim();
        if access_token.is_empty() || app_secret.is_empty() {
            return Err(SourceError::authentication(
                "facebook access token and app secret are required",
            ));
        }

        let account_id = ad_account_path(&config.ad_account_id).ok_or_else(|| {
            SourceError::authentication("facebook ad account id is not configured")
        })?;

        let account_url = format!(
            "{GRAPH_BASE_URL}/{}/{account_id}",
            config.graph_version.trim()
        );
        info!(upstream = "facebook", account = %account_id, "facebook ads adapter bound");

        Ok(Self {
            http_client,
            account_url,
            access_token: access_token.to_owned(),
            appsecret_proof: appsecret_proof(app_secret, access_token)?,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn build_request(&self, edge: Option<&str>) -> HttpRequest {
        let url = match edge {
            Some(edge) => format!("{}/{edge}", self.account_url),
            None => self.account_url.clone(),
        };
        HttpRequest::get(url)
            .with_query("access_token", &self.access_token)
            .with_query("appsecret_proof", &self.appsecret_proof)
            .with_timeout_ms(self.timeout_ms)
    }

    async fn fetch<T>(&self, edge: &str, request: HttpRequest) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        debug!(upstream = "facebook", path = %request.path(), "issuing upstream request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("facebook transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            let detail = graph_error_message(&response.body);
            warn!(
                upstream = "facebook",
                edge,
                status = response.status,
                "upstream returned an error status"
            );
            return Err(SourceError::from_status(
                Upstream::Facebook,
                response.status,
                &detail,
            ));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            SourceError::malformed_payload(format!(
                "failed to parse facebook {edge} response: {error}"
            ))
        })
    }
}

impl AdsSource for FacebookAdsAdapter {
    fn ad_sets<'a>(&'a self, req: AdSetsRequest) -> SourceFuture<'a, AdSetBatch> {
        Box::pin(async move {
            let request = self
                .build_request(Some("adsets"))
                .with_query("fields", AD_SET_FIELDS)
                .with_query("limit", req.limit.to_string());

            let payload: GraphPage<GraphAdSetPayload> = self.fetch("adsets", request).await?;
            let adsets = payload
                .data
                .into_iter()
                .take(req.limit as usize)
                .map(normalize_ad_set)
                .collect::<Result<Vec<_>, _>>()?;

            info!(upstream = "facebook", count = adsets.len(), "fetched ad sets");
            Ok(AdSetBatch { adsets })
        })
    }

    fn ads<'a>(&'a self, req: AdsRequest) -> SourceFuture<'a, AdBatch> {
        Box::pin(async move {
            let request = self
                .build_request(Some("ads"))
                .with_query("fields", AD_FIELDS)
                .with_query("limit", req.limit.to_string());

            let payload: GraphPage<GraphAdPayload> = self.fetch("ads", request).await?;
            let ads = payload
                .data
                .into_iter()
                .take(req.limit as usize)
                .map(normalize_ad)
                .collect::<Result<Vec<_>, _>>()?;

            info!(upstream = "facebook", count = ads.len(), "fetched ads");
            Ok(AdBatch { ads })
        })
    }

    fn insights<'a>(&'a self, req: InsightsRequest) -> SourceFuture<'a, InsightBatch> {
        Box::pin(async move {
            let fields = match req.level.id_field() {
                Some(id_field) => format!("{INSIGHT_FIELDS},{id_field}"),
                None => String::from(INSIGHT_FIELDS),
            };
            let request = self
                .build_request(Some("insights"))
                .with_query("fields", fields)
                .with_query("level", req.level.as_str())
                .with_query("date_preset", req.date_preset().as_str())
                .with_query("time_increment", "1");

            let payload: GraphPage<GraphInsightPayload> = self.fetch("insights", request).await?;
            let insights: Vec<Insight> = payload
                .data
                .into_iter()
                .map(|row| normalize_insight(row, req.level))
                .collect();

            info!(
                upstream = "facebook",
                count = insights.len(),
                level = %req.level,
                date_preset = %req.date_preset(),
                "fetched insights"
            );
            Ok(InsightBatch { insights })
        })
    }

    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>> {
        Box::pin(async move {
            let request = self.build_request(None).with_query("fields", "id");

            match self.fetch::<serde_json::Value>("account", request).await {
                Ok(_) => HealthStatus::healthy(Upstream::Facebook),
                Err(error) => HealthStatus::unhealthy(Upstream::Facebook, error.message()),
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GraphPage<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GraphAdSetPayload {
    id: String,
    name: String,
    campaign_id: String,
    #[serde(default)]
    daily_budget: Option<String>,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    targeting: Option<JsonObject>,
}

#[derive(Debug, Deserialize)]
struct GraphAdPayload {
    id: String,
    name: String,
    adset_id: String,
    status: String,
    created_time: String,
}

#[derive(Debug, Deserialize)]
struct GraphInsightPayload {
    date_start: String,
    date_stop: String,
    #[serde(default)]
    campaign_id: Option<String>,
    #[serde(default)]
    adset_id: Option<String>,
    #[serde(default)]
    ad_id: Option<String>,
    impressions: String,
    clicks: String,
    spend: String,
    #[serde(default)]
    cpc: Option<String>,
    #[serde(default)]
    ctr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    #[serde(default)]
    message: String,
}

fn normalize_ad_set(payload: GraphAdSetPayload) -> Result<AdSet, SourceError> {
    let end_time = match payload.end_time.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(Timestamp::parse_graph(value)?),
        _ => None,
    };

    Ok(AdSet {
        id: payload.id,
        name: payload.name,
        campaign_id: payload.campaign_id,
        daily_budget: payload.daily_budget,
        start_time: Timestamp::parse_graph(&payload.start_time)?,
        end_time,
        targeting: payload.targeting,
    })
}

fn normalize_ad(payload: GraphAdPayload) -> Result<Ad, SourceError> {
    Ok(Ad {
        id: payload.id,
        name: payload.name,
        adset_id: payload.adset_id,
        status: payload.status,
        created_time: Timestamp::parse_graph(&payload.created_time)?,
    })
}

/// Keeps only the identifier matching `level`.
fn normalize_insight(payload: GraphInsightPayload, level: InsightLevel) -> Insight {
    let (campaign_id, adset_id, ad_id) = match level {
        InsightLevel::Account => (None, None, None),
        InsightLevel::Campaign => (payload.campaign_id, None, None),
        InsightLevel::AdSet => (None, payload.adset_id, None),
        InsightLevel::Ad => (None, None, payload.ad_id),
    };

    Insight {
        date_start: payload.date_start,
        date_stop: payload.date_stop,
        campaign_id,
        adset_id,
        ad_id,
        impressions: payload.impressions,
        clicks: payload.clicks,
        spend: payload.spend,
        cpc: payload.cpc,
        ctr: payload.ctr,
    }
}

fn ad_account_path(ad_account_id: &str) -> Option<String> {
    let trimmed = ad_account_id.trim();
    match trimmed.strip_prefix("act_") {
        Some("") => None,
        Some(_) => Some(trimmed.to_owned()),
        None if trimmed.is_empty() => None,
        None => Some(format!("act_{trimmed}")),
    }
}

fn appsecret_proof(app_secret: &str, access_token: &str) -> Result<String, SourceError> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|error| SourceError::internal(format!("invalid app secret key: {error}")))?;
    mac.update(access_token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn graph_error_message(body: &str) -> String {
    serde_json::from_str::<GraphErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_default()
}
