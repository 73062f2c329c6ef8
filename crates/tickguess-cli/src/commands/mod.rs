mod play;
mod series;

use std::sync::Arc;

use tickguess_core::config::{non_empty, positive};
use tickguess_core::{ConfigError, GameConfig, ReqwestHttpClient, SeriesSource};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = resolve_config(cli, GameConfig::from_env()?)?;
    tracing::debug!(?config, "resolved configuration");

    let source: Arc<dyn SeriesSource> =
        Arc::new(config.build_adapter(Arc::new(ReqwestHttpClient::new())));

    match &cli.command {
        Command::Play(args) => play::run(args, source, config.window).await,
        Command::Series(args) => series::run(args, &*source).await,
    }
}

/// Flags win over environment values and pass the same checks.
fn resolve_config(cli: &Cli, mut config: GameConfig) -> Result<GameConfig, ConfigError> {
    if let Some(api_key) = &cli.api_key {
        config.api_key = non_empty("--api-key", api_key.clone())?;
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = non_empty("--base-url", base_url.clone())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = positive("--timeout-ms", timeout_ms)?;
    }
    if let Some(quota) = cli.quota_per_minute {
        config.quota_per_minute = quota;
    }
    Ok(config)
}
