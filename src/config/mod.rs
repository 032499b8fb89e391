#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, SkillError};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const ACCESS_KEY_ENV: &str = "api_layer_key";
pub const RATE_API_URL_ENV: &str = "RATE_API_URL";
pub const RATE_API_TIMEOUT_ENV: &str = "RATE_API_TIMEOUT_SECS";
pub const APPLICATION_ID_ENV: &str = "SKILL_APPLICATION_ID";

pub const DEFAULT_RATE_API_URL: &str = "http://apilayer.net/api/live";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// The voice platform abandons a request after roughly 8 s; the apology
/// reply still has to arrive before that.
pub const MAX_TIMEOUT_SECS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateApiConfig {
    pub base_url: String,
    pub access_key: String,
    pub timeout_secs: u64,
}

impl RateApiConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_RATE_API_URL.to_string(),
            access_key: access_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn check_base_url(&self) -> Result<()> {
        let invalid = |reason: String| SkillError::InvalidConfigValueError {
            field: "rate_api.base_url".to_string(),
            value: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(format!("Invalid URL: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(format!("Rate API must be reached over http(s), got {}", scheme))),
        }
    }

    fn check_timeout(&self) -> Result<()> {
        if (1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Ok(());
        }
        Err(SkillError::InvalidConfigValueError {
            field: "rate_api.timeout_secs".to_string(),
            value: self.timeout_secs.to_string(),
            reason: format!(
                "Must be 1..={} so the reply beats the platform deadline",
                MAX_TIMEOUT_SECS
            ),
        })
    }
}

/// Process-wide settings, built once at startup and handed to the
/// currency client and the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub rate_api: RateApiConfig,
    /// When set, events from any other skill are rejected.
    pub application_id: Option<String>,
}

impl SkillConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. `from_env` is
    /// this over `std::env::var`.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(ACCESS_KEY_ENV);
        let access_key = validate_required_field(ACCESS_KEY_ENV, &access_key)?.clone();

        let timeout_secs = match lookup(RATE_API_TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SkillError::InvalidConfigValueError {
                    field: RATE_API_TIMEOUT_ENV.to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of seconds".to_string(),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            rate_api: RateApiConfig {
                base_url: lookup(RATE_API_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_RATE_API_URL.to_string()),
                access_key,
                timeout_secs,
            },
            application_id: lookup(APPLICATION_ID_ENV).filter(|id| !id.trim().is_empty()),
        })
    }
}

impl Validate for SkillConfig {
    fn validate(&self) -> Result<()> {
        self.rate_api.check_base_url()?;
        validate_non_empty_string("rate_api.access_key", &self.rate_api.access_key)?;
        self.rate_api.check_timeout()?;

        tracing::debug!("Skill configuration validation passed");
        Ok(())
    }
}
