//! CLI argument definitions for tickguess.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `play` | Interactive up/down guessing game |
//! | `series` | Print the cleaned daily series as JSON |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | env or `demo` | Alpha Vantage API key |
//! | `--base-url` | Alpha Vantage | Query endpoint |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--quota-per-minute` | `5` | Client-side request budget, `0` disables |
//! | `--log-format` | `text` | Log output on stderr (text, json) |
//!
//! # Examples
//!
//! ```bash
//! # Start a game right away
//! tickguess play AAPL
//!
//! # Inspect what the loader sees
//! tickguess series IBM --limit 10 --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Guess whether a stock went up or down on the next trading day.
#[derive(Debug, Parser)]
#[command(
    name = "tickguess",
    author,
    version,
    about = "Stock up/down guessing game on Alpha Vantage daily prices",
    long_about = "tickguess picks a random day from the last 100 days of a stock's history, \
shows you the week leading up to it, and asks whether the next trading day closed higher \
or lower.\n\
\n\
Settings are read from TICKGUESS_* environment variables (a .env file is honored) and \
may be overridden with the flags below."
)]
pub struct Cli {
    /// Alpha Vantage API key (overrides TICKGUESS_ALPHAVANTAGE_API_KEY).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Query endpoint (overrides TICKGUESS_ALPHAVANTAGE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (overrides TICKGUESS_TIMEOUT_MS).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Requests allowed per minute; 0 disables the client-side budget.
    #[arg(long, global = true)]
    pub quota_per_minute: Option<u32>,

    /// Log line format on stderr. Verbosity follows RUST_LOG.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play interactively.
    ///
    /// Commands at the prompt: start <TICKER>, up (u), down (d), end (e),
    /// help, quit.
    ///
    /// # Examples
    ///
    ///   tickguess play
    ///   tickguess play msft --seed 42
    Play(PlayArgs),

    /// Fetch a ticker's daily series and print it as JSON.
    ///
    /// # Examples
    ///
    ///   tickguess series AAPL
    ///   tickguess series AAPL --limit 20 --pretty
    Series(SeriesArgs),
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Ticker to start with; omit to start from the prompt.
    pub ticker: Option<String>,

    /// Seed for the start-day pick, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    pub symbol: String,

    /// Only print the most recent N days.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
