//! Behavior-driven tests for the series loader
//!
//! These tests verify HOW raw provider responses become a playable series and
//! how provider failures are classified.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tickguess_core::{
    AlphaVantageAdapter, HttpClient, HttpError, HttpRequest, HttpResponse, LoadError,
    PriceBasis, RequestBudget, SeriesSource, Symbol,
};

struct CannedHttpClient {
    response: Result<HttpResponse, HttpError>,
    calls: Mutex<usize>,
}

impl CannedHttpClient {
    fn body(body: &str) -> Arc<Self> {
        Self::returning(Ok(HttpResponse::ok_json(body)))
    }

    fn returning(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("call counter should not be poisoned")
    }
}

impl HttpClient for CannedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        *self.calls.lock().expect("call counter should not be poisoned") += 1;
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn adapter(client: Arc<CannedHttpClient>) -> AlphaVantageAdapter {
    AlphaVantageAdapter::new(client, "test-key").with_budget(RequestBudget::unlimited())
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

// =============================================================================
// Series Loader: Valid Responses
// =============================================================================

#[tokio::test]
async fn when_provider_returns_unordered_days_series_is_strictly_increasing() {
    // Given: A provider that lists days newest first, as Alpha Vantage does
    let body = r#"{
        "Meta Data": {"1. Information": "Daily Time Series with Splits and Dividend Events"},
        "Time Series (Daily)": {
            "2024-05-10": {"4. close": "183.05", "5. adjusted close": "183.05"},
            "2024-05-09": {"4. close": "184.57", "5. adjusted close": "184.57"},
            "2024-05-13": {"4. close": "186.28", "5. adjusted close": "186.28"},
            "2024-05-08": {"4. close": "182.74", "5. adjusted close": "182.49"}
        }
    }"#;

    // When: The series is loaded
    let series = adapter(CannedHttpClient::body(body))
        .daily_series(&symbol("aapl"))
        .await
        .expect("valid body should load");

    // Then: Dates are strictly increasing and prices are usable
    assert_eq!(series.len(), 4);
    for pair in series.points().windows(2) {
        assert!(pair[0].date < pair[1].date, "dates must strictly increase");
    }
    for point in series.points() {
        assert!(point.price.is_finite() && point.price >= 0.0);
    }
    assert_eq!(series.get(0).map(|p| p.price), Some(182.49));
}

#[tokio::test]
async fn when_some_records_are_unusable_they_are_dropped_not_fatal() {
    // Given: A body mixing good records with NaN, negative and missing prices
    let body = r#"{"Time Series (Daily)": {
        "2024-05-08": {"4. close": "10.00"},
        "2024-05-09": {"4. close": "NaN", "5. adjusted close": "NaN"},
        "2024-05-10": {"4. close": "-1.00"},
        "2024-05-13": {"1. open": "11.00"},
        "2024-05-14": {"4. close": "12.00", "5. adjusted close": "11.90"}
    }}"#;

    // When: The series is loaded
    let series = adapter(CannedHttpClient::body(body))
        .daily_series(&symbol("ibm"))
        .await
        .expect("partially usable body should load");

    // Then: Only the two usable days survive, and the basis reports the fallback
    let dates = series
        .points()
        .iter()
        .map(|p| p.date.format_iso())
        .collect::<Vec<_>>();
    assert_eq!(dates, vec!["2024-05-08", "2024-05-14"]);
    assert_eq!(series.basis(), PriceBasis::Close);
    assert_eq!(series.fallback_count(), 1);
}

// =============================================================================
// Series Loader: Failure Classification
// =============================================================================

#[tokio::test]
async fn when_provider_sends_rate_limit_note_user_is_told_to_wait() {
    // Given: The provider's free-tier throttle notice
    let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;

    // When: A load is attempted
    let error = adapter(CannedHttpClient::body(body))
        .daily_series(&symbol("aapl"))
        .await
        .expect_err("note must fail");

    // Then: It is classified as rate limiting
    assert!(matches!(error, LoadError::RateLimited { .. }));
    assert_eq!(
        error.user_message(),
        "Rate limit reached. Wait a minute and try again."
    );
}

#[tokio::test]
async fn when_provider_rejects_symbol_user_gets_invalid_ticker() {
    // Given: The provider's error payload for an unknown symbol
    let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;

    // When: A load is attempted
    let error = adapter(CannedHttpClient::body(body))
        .daily_series(&symbol("notreal"))
        .await
        .expect_err("error message must fail");

    // Then: The error names the normalized symbol
    assert_eq!(
        error,
        LoadError::InvalidTicker {
            symbol: String::from("NOTREAL")
        }
    );
}

#[tokio::test]
async fn when_time_series_is_missing_response_is_malformed() {
    let error = adapter(CannedHttpClient::body(r#"{"Meta Data": {}}"#))
        .daily_series(&symbol("aapl"))
        .await
        .expect_err("missing container must fail");

    assert!(matches!(error, LoadError::MalformedResponse { .. }));
    assert_eq!(error.code(), "game.malformed_response");
}

#[tokio::test]
async fn when_upstream_status_is_not_success_it_is_a_network_error() {
    // Given: A gateway error whose body would otherwise look like a rate limit
    let client = CannedHttpClient::returning(Ok(HttpResponse::with_status(
        503,
        r#"{"Note": "ignored"}"#,
    )));

    // When: A load is attempted
    let error = adapter(client)
        .daily_series(&symbol("aapl"))
        .await
        .expect_err("503 must fail");

    // Then: The transport status takes priority
    assert_eq!(error, LoadError::network_status(503));
    assert_eq!(error.user_message(), "Network error (503).");
}

#[tokio::test]
async fn when_connection_fails_no_retry_is_attempted() {
    // Given: A transport that cannot connect
    let client = CannedHttpClient::returning(Err(HttpError::new("connection failed")));

    // When: A load is attempted
    let error = adapter(client.clone())
        .daily_series(&symbol("aapl"))
        .await
        .expect_err("transport failure must fail");

    // Then: Exactly one request was made and the cause is shown
    assert!(matches!(error, LoadError::NetworkError { status: None, .. }));
    assert_eq!(error.user_message(), "Network error (connection failed).");
    assert_eq!(client.calls(), 1);
}
