use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::data_source::{LoadError, SeriesSource};
use crate::http_client::{HttpClient, HttpRequest};
use crate::throttling::RequestBudget;
use crate::{PriceBasis, PricePoint, Series, Symbol, TradingDate};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY_ADJUSTED";
const OUTPUT_SIZE: &str = "compact";
const FREE_TIER_CALLS_PER_MINUTE: u32 = 5;

/// Alpha Vantage daily-history loader.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout_ms: u64,
    budget: RequestBudget,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 10_000,
            budget: RequestBudget::per_minute(FREE_TIER_CALLS_PER_MINUTE),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_budget(mut self, budget: RequestBudget) -> Self {
        self.budget = budget;
        self
    }

    fn daily_request(&self, symbol: &Symbol) -> HttpRequest {
        HttpRequest::get(&self.base_url)
            .with_query("function", DAILY_FUNCTION)
            .with_query("symbol", symbol.as_str())
            .with_query("outputsize", OUTPUT_SIZE)
            .with_query("apikey", &self.api_key)
            .with_timeout_ms(self.timeout_ms)
    }

    async fn fetch_daily_series(&self, symbol: &Symbol) -> Result<Series, LoadError> {
        if let Err(wait) = self.budget.acquire() {
            return Err(LoadError::RateLimited {
                notice: format!(
                    "alphavantage free-tier budget spent; retry in {:.0}s",
                    wait.as_secs_f64().ceil()
                ),
            });
        }

        tracing::info!(symbol = %symbol, "requesting daily series from alphavantage");

        let response = self
            .http_client
            .execute(self.daily_request(symbol))
            .await
            .map_err(|error| {
                tracing::info!(symbol = %symbol, timed_out = error.timed_out(), "alphavantage transport error: {error}");
                LoadError::transport(error.message())
            })?;

        if !response.is_success() {
            tracing::info!(symbol = %symbol, status = response.status, "alphavantage returned non-success status");
            return Err(LoadError::network_status(response.status));
        }

        let series = parse_daily_series(symbol, &response.body)?;

        let fallback = series.fallback_count();
        if fallback > 0 {
            tracing::warn!(
                symbol = %symbol,
                fallback,
                "adjusted close missing for some days; using plain close"
            );
        }
        tracing::info!(symbol = %symbol, points = series.len(), "loaded daily series");

        Ok(series)
    }
}

impl std::fmt::Debug for AlphaVantageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageAdapter")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}

impl SeriesSource for AlphaVantageAdapter {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    fn daily_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Series, LoadError>> + Send + 'a>> {
        Box::pin(self.fetch_daily_series(symbol))
    }
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Note", default)]
    note: Option<Value>,
    #[serde(rename = "Information", default)]
    information: Option<Value>,
    #[serde(rename = "Error Message", default)]
    error_message: Option<Value>,
    #[serde(rename = "Time Series (Daily)", default)]
    time_series: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DailyRecord {
    #[serde(rename = "4. close", default)]
    close: Option<Value>,
    #[serde(rename = "5. adjusted close", default)]
    adjusted_close: Option<Value>,
}

impl DailyRecord {
    fn price(&self) -> Option<(f64, PriceBasis)> {
        numeric(self.adjusted_close.as_ref())
            .map(|price| (price, PriceBasis::AdjustedClose))
            .or_else(|| numeric(self.close.as_ref()).map(|price| (price, PriceBasis::Close)))
    }
}

/// Parse a `TIME_SERIES_DAILY_ADJUSTED` body into a series.
///
/// Rate-limit notices win over error messages, which win over a missing
/// time-series container. Records with an unusable date or price are dropped.
pub fn parse_daily_series(symbol: &Symbol, body: &str) -> Result<Series, LoadError> {
    let response: DailySeriesResponse = serde_json::from_str(body)
        .map_err(|e| LoadError::malformed(format!("response is not a JSON object: {e}")))?;

    if let Some(notice) = response.note.or(response.information) {
        return Err(LoadError::RateLimited {
            notice: text_of(&notice),
        });
    }

    if response.error_message.is_some() {
        return Err(LoadError::InvalidTicker {
            symbol: symbol.as_str().to_owned(),
        });
    }

    let raw = match response.time_series {
        Some(Value::Object(map)) => map,
        Some(_) => return Err(LoadError::malformed("daily time series is not an object")),
        None => return Err(LoadError::malformed("daily time series missing")),
    };

    let mut points = Vec::with_capacity(raw.len());
    let mut skipped = 0_usize;
    for (date_key, record) in raw {
        match parse_record(&date_key, record) {
            Some(point) => points.push(point),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(
            symbol = %symbol,
            skipped,
            "dropped daily records without a usable date or price"
        );
    }

    Series::from_points(points).map_err(|e| LoadError::malformed(e.to_string()))
}

fn parse_record(date_key: &str, record: Value) -> Option<PricePoint> {
    let date = TradingDate::parse(date_key).ok()?;
    let record: DailyRecord = serde_json::from_value(record).ok()?;
    let (price, basis) = record.price()?;
    PricePoint::new(date, price, basis).ok()
}

/// Provider numbers arrive as strings; plain JSON numbers are accepted too.
fn numeric(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Number(number) => number.as_f64()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
