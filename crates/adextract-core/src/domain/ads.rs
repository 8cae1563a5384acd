use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{JsonObject, Timestamp, ValidationError};

/// Normalized ad set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSet {
    pub id: String,
    pub name: String,
    pub campaign_id: String,
    pub daily_budget: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub targeting: Option<JsonObject>,
}

/// Normalized ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub id: String,
    pub name: String,
    pub adset_id: String,
    pub status: String,
    pub created_time: Timestamp,
}

/// One daily performance row at the requested [`InsightLevel`].
///
/// At most one of `campaign_id`, `adset_id`, `ad_id` is set, matching the
/// level; none are set at account level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub date_start: String,
    pub date_stop: String,
    pub campaign_id: Option<String>,
    pub adset_id: Option<String>,
    pub ad_id: Option<String>,
    pub impressions: String,
    pub clicks: String,
    pub spend: String,
    pub cpc: Option<String>,
    pub ctr: Option<String>,
}

/// Granularity of an insights report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsightLevel {
    #[default]
    #[serde(rename = "account")]
    Account,
    #[serde(rename = "campaign")]
    Campaign,
    #[serde(rename = "adset")]
    AdSet,
    #[serde(rename = "ad")]
    Ad,
}

impl InsightLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Campaign => "campaign",
            Self::AdSet => "adset",
            Self::Ad => "ad",
        }
    }

    /// Identifier field attached to rows at this level.
    pub const fn id_field(self) -> Option<&'static str> {
        match self {
            Self::Account => None,
            Self::Campaign => Some("campaign_id"),
            Self::AdSet => Some("adset_id"),
            Self::Ad => Some("ad_id"),
        }
    }
}

impl FromStr for InsightLevel {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "account" => Ok(Self::Account),
            "campaign" => Ok(Self::Campaign),
            "adset" => Ok(Self::AdSet),
            "ad" => Ok(Self::Ad),
            other => Err(ValidationError::InvalidInsightLevel {
                value: other.to_owned(),
            }),
        }
    }
}

impl Display for InsightLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse lookback window accepted by the insights endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "last_30d")]
    Last30Days,
    #[serde(rename = "last_7d")]
    Last7Days,
    #[serde(rename = "yesterday")]
    Yesterday,
}

impl DatePreset {
    /// Buckets a day count into a preset by exact match: 30 and 7 map to their
    /// presets, every other value (negative included) maps to `Yesterday`.
    pub const fn from_days(days: i64) -> Self {
        match days {
            30 => Self::Last30Days,
            7 => Self::Last7Days,
            _ => Self::Yesterday,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Last30Days => "last_30d",
            Self::Last7Days => "last_7d",
            Self::Yesterday => "yesterday",
        }
    }
}

impl Display for DatePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
