use std::sync::Arc;

use crate::adapters::{AlphaVantageAdapter, DEFAULT_BASE_URL};
use crate::http_client::HttpClient;
use crate::selector::StartWindow;
use crate::throttling::RequestBudget;
use crate::ConfigError;

pub const API_KEY_VAR: &str = "TICKGUESS_ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "TICKGUESS_ALPHAVANTAGE_URL";
pub const TIMEOUT_VAR: &str = "TICKGUESS_TIMEOUT_MS";
pub const QUOTA_VAR: &str = "TICKGUESS_QUOTA_PER_MINUTE";

/// Runtime settings for the loader and the start-day window.
#[derive(Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
    /// Client-side request budget; `0` disables it.
    pub quota_per_minute: u32,
    pub window: StartWindow,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_key: String::from("demo"),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 10_000,
            quota_per_minute: 5,
            window: StartWindow::default(),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(api_key) = lookup(API_KEY_VAR) {
            config.api_key = non_empty(API_KEY_VAR, api_key)?;
        }
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = non_empty(BASE_URL_VAR, base_url)?;
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            config.timeout_ms = positive(TIMEOUT_VAR, parse_number(TIMEOUT_VAR, &value)?)?;
        }
        if let Some(value) = lookup(QUOTA_VAR) {
            config.quota_per_minute = parse_number(QUOTA_VAR, &value)?;
        }

        Ok(config)
    }

    pub fn build_adapter(&self, http_client: Arc<dyn HttpClient>) -> AlphaVantageAdapter {
        AlphaVantageAdapter::new(http_client, self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout_ms(self.timeout_ms)
            .with_budget(RequestBudget::per_minute(self.quota_per_minute))
    }
}

impl std::fmt::Debug for GameConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("quota_per_minute", &self.quota_per_minute)
            .field("window", &self.window)
            .finish()
    }
}

/// Trims `value`, rejecting blank input. `var` names where it came from.
pub fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed.to_owned())
}

pub fn positive(var: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Zero { var });
    }
    Ok(value)
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_owned(),
        })
}
