use thiserror::Error;

/// Validation and contract errors exposed by `adextract-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidRfc3339 { value: String },
    #[error("timestamp must match YYYY-MM-DDTHH:MM:SS+HHMM: '{value}'")]
    InvalidGraphTimestamp { value: String },

    #[error("invalid insights level '{value}', expected one of account, campaign, adset, ad")]
    InvalidInsightLevel { value: String },
}

/// Configuration errors raised while loading [`crate::AppConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable '{name}' is not set")]
    MissingVar { name: &'static str },

    #[error("environment variable '{name}' has invalid value '{value}': {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}
