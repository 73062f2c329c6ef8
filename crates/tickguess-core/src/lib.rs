//! # Tickguess Core
//!
//! Game engine for tickguess: guess whether a stock closed higher or lower on
//! the next trading day, starting from a random day in its recent history.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage daily-series loader |
//! | [`config`] | Environment-driven settings |
//! | [`controller`] | Intent dispatch over one game session |
//! | [`data_source`] | Series source trait and load errors |
//! | [`domain`] | Symbol, trading date, price point, series |
//! | [`error`] | Validation, config and game errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`intent`] | Player intents parsed from text |
//! | [`presentation`] | Sink contract for status, chart, HUD |
//! | [`selector`] | Random start-day selection |
//! | [`session`] | Game session state machine |
//! | [`throttling`] | Client-side request budget |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickguess_core::{GameConfig, GameController, Intent, MemorySink, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::from_env()?;
//!     let source = config.build_adapter(Arc::new(ReqwestHttpClient::new()));
//!     let mut game = GameController::new(Arc::new(source), MemorySink::default());
//!
//!     game.dispatch(Intent::Start(String::from("AAPL"))).await?;
//!     game.dispatch("up".parse()?).await?;
//!     game.dispatch(Intent::End).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Flow
//!
//! ```text
//! Intent ──▶ GameController ──▶ SeriesSource (HTTP) ──▶ StartWindow
//!                 │                                         │
//!                 ▼                                         ▼
//!         PresentationSink ◀──────────────────────── GameSession
//! ```
//!
//! ## Security
//!
//! - The API key is read from the environment and never logged
//! - Transport errors are stripped of the request URL before surfacing

pub mod adapters;
pub mod config;
pub mod controller;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod intent;
pub mod presentation;
pub mod selector;
pub mod session;
pub mod throttling;

pub use adapters::{parse_daily_series, AlphaVantageAdapter};
pub use config::GameConfig;
pub use controller::{Clock, FixedClock, GameController, Outcome, SystemClock};
pub use data_source::{LoadError, SeriesSource};
pub use domain::{PriceBasis, PricePoint, Series, Symbol, TradingDate};
pub use error::{ConfigError, GameError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use intent::{Intent, IntentParseError};
pub use presentation::{
    ChartPayload, ChartPoint, Controls, Hud, MemorySink, PresentationSink, Severity,
    StatusMessage,
};
pub use selector::{choose_start, StartWindow};
pub use session::{
    Direction, EndSummary, GameSession, Movement, Operation, Prediction, SessionState,
};
pub use throttling::RequestBudget;
