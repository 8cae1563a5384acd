use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::ValidationError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Fixed timestamp layout used by the Graph API, e.g. `2024-01-15T10:30:00+0000`.
const GRAPH_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
);

/// Absolute instant with the upstream's UTC offset preserved.
///
/// Serializes as RFC3339. Equality and ordering compare instants, so
/// `10:30:00+0000` and `05:30:00-0500` are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parses Shopify-style RFC3339 timestamps (`2024-01-15T10:30:00-05:00`).
    pub fn parse_rfc3339(input: &str) -> Result<Self, ValidationError> {
        OffsetDateTime::parse(input, &Rfc3339)
            .map(Self)
            .map_err(|_| ValidationError::InvalidRfc3339 {
                value: input.to_owned(),
            })
    }

    /// Parses Graph API timestamps. No fallback format is attempted.
    pub fn parse_graph(input: &str) -> Result<Self, ValidationError> {
        OffsetDateTime::parse(input, GRAPH_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidGraphTimestamp {
                value: input.to_owned(),
            })
    }

    pub const fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value)
    }

    pub const fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// Instant `days` days before this one; negative `days` move forward.
    ///
    /// Returns `None` when the result falls outside the representable range.
    pub fn days_before(self, days: i64) -> Option<Self> {
        let seconds = days.checked_mul(SECONDS_PER_DAY)?;
        self.0.checked_sub(Duration::seconds(seconds)).map(Self)
    }

    pub fn format_rfc3339(self) -> Result<String, time::error::Format> {
        self.0.format(&Rfc3339)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.format_rfc3339() {
            Ok(value) => f.write_str(&value),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.format_rfc3339().map_err(S::Error::custom)?;
        serializer.serialize_str(&value)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&value).map_err(D::Error::custom)
    }
}
