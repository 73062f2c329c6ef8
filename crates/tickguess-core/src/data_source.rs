//! Series source contract and its failure taxonomy.
//!
//! A [`SeriesSource`] turns a [`Symbol`] into a cleaned daily [`Series`].
//! The Alpha Vantage adapter is the production implementation; tests plug in
//! in-memory sources.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::{Series, Symbol};

/// Provider-level failure, classified from the transport status and the
/// response body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("provider does not know symbol '{symbol}'")]
    InvalidTicker { symbol: String },

    #[error("provider rate limit reached: {notice}")]
    RateLimited { notice: String },

    #[error("malformed provider response: {reason}")]
    MalformedResponse { reason: String },

    #[error("network error: {reason}")]
    NetworkError { status: Option<u16>, reason: String },
}

impl LoadError {
    pub fn network_status(status: u16) -> Self {
        Self::NetworkError {
            status: Some(status),
            reason: format!("upstream returned status {status}"),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::NetworkError {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidTicker { .. } => "game.invalid_ticker",
            Self::RateLimited { .. } => "game.rate_limited",
            Self::MalformedResponse { .. } => "game.malformed_response",
            Self::NetworkError { .. } => "game.network_error",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidTicker { .. } => {
                String::from("That ticker does not exist. Please try another.")
            }
            Self::RateLimited { .. } => {
                String::from("Rate limit reached. Wait a minute and try again.")
            }
            Self::MalformedResponse { .. } => {
                String::from("Unexpected API response. Please try again.")
            }
            Self::NetworkError {
                status: Some(status),
                ..
            } => format!("Network error ({status})."),
            Self::NetworkError {
                status: None,
                reason,
            } => format!("Network error ({reason})."),
        }
    }
}

/// Anything that can produce a daily series for a ticker.
pub trait SeriesSource: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    fn daily_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Series, LoadError>> + Send + 'a>>;
}
