//! Process configuration loaded once at startup.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `SHOPIFY_SHOP_URL` | yes | - |
//! | `SHOPIFY_API_KEY` | yes | - |
//! | `SHOPIFY_API_SECRET` | yes | - |
//! | `SHOPIFY_API_VERSION` | no | `2024-01` |
//! | `FB_APP_ID` | yes | - |
//! | `FB_APP_SECRET` | yes | - |
//! | `FB_ACCESS_TOKEN` | yes | - |
//! | `FB_AD_ACCOUNT_ID` | yes | - |
//! | `FB_GRAPH_VERSION` | no | `v19.0` |
//! | `ADEXTRACT_UPSTREAM_TIMEOUT_MS` | no | `30000` |
//!
//! A `.env` file in the working directory is read first when present; real
//! environment variables take precedence over it.

use std::fmt::{Debug, Formatter};

use tracing::warn;

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::ConfigError;

pub const DEFAULT_SHOPIFY_API_VERSION: &str = "2024-01";
pub const DEFAULT_GRAPH_VERSION: &str = "v19.0";

/// Storefront credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ShopifyConfig {
    pub shop_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_version: String,
}

impl Debug for ShopifyConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("shop_url", &self.shop_url)
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Ads platform credentials and the single bound ad account.
#[derive(Clone, PartialEq, Eq)]
pub struct FacebookConfig {
    pub app_id: String,
    pub app_secret: String,
    pub access_token: String,
    pub ad_account_id: String,
    pub graph_version: String,
}

impl Debug for FacebookConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("ad_account_id", &self.ad_account_id)
            .field("graph_version", &self.graph_version)
            .finish()
    }
}

/// Transport settings shared by both adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Immutable process configuration injected into adapters at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub shopify: ShopifyConfig,
    pub facebook: FacebookConfig,
    pub http: HttpSettings,
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(error) = seed_from_dotenv() {
            warn!(error = %error, "ignoring malformed .env file");
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar { name })
        };
        let optional = |name: &'static str, default: &str| -> String {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let shopify = ShopifyConfig {
            shop_url: required("SHOPIFY_SHOP_URL")?,
            api_key: required("SHOPIFY_API_KEY")?,
            api_secret: required("SHOPIFY_API_SECRET")?,
            api_version: optional("SHOPIFY_API_VERSION", DEFAULT_SHOPIFY_API_VERSION),
        };

        let facebook = FacebookConfig {
            app_id: required("FB_APP_ID")?,
            app_secret: required("FB_APP_SECRET")?,
            access_token: required("FB_ACCESS_TOKEN")?,
            ad_account_id: required("FB_AD_ACCOUNT_ID")?,
            graph_version: optional("FB_GRAPH_VERSION", DEFAULT_GRAPH_VERSION),
        };

        let timeout_raw = optional(
            "ADEXTRACT_UPSTREAM_TIMEOUT_MS",
            &DEFAULT_TIMEOUT_MS.to_string(),
        );
        let timeout_ms = timeout_raw
            .parse::<u64>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| ConfigError::InvalidVar {
                name: "ADEXTRACT_UPSTREAM_TIMEOUT_MS",
                value: timeout_raw.clone(),
                reason: String::from("expected a positive integer"),
            })?;

        Ok(Self {
            shopify,
            facebook,
            http: HttpSettings { timeout_ms },
        })
    }
}

/// Seeds the process environment from `.env` without overriding variables
/// that are already set.
///
/// A missing file is not an error. Returns the error of a `.env` that exists
/// but could not be read or parsed, for the caller to log once logging is up.
pub fn seed_from_dotenv() -> Option<dotenvy::Error> {
    dotenvy::dotenv().err().and_then(reportable_dotenv_error)
}

fn reportable_dotenv_error(error: dotenvy::Error) -> Option<dotenvy::Error> {
    if error.not_found() {
        None
    } else {
        Some(error)
    }
}
