use std::io::Write;

use serde::Serialize;

use tickguess_core::{GameError, PriceBasis, PricePoint, SeriesSource, Symbol};

use crate::cli::SeriesArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SeriesResponseData<'a> {
    symbol: &'a Symbol,
    source: &'static str,
    basis: PriceBasis,
    total_points: usize,
    points: &'a [PricePoint],
}

pub async fn run(args: &SeriesArgs, source: &dyn SeriesSource) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let series = source
        .daily_series(&symbol)
        .await
        .map_err(GameError::from)?;

    let points = series.points();
    let skip = args
        .limit
        .map_or(0, |limit| points.len().saturating_sub(limit));

    let data = SeriesResponseData {
        symbol: &symbol,
        source: source.name(),
        basis: series.basis(),
        total_points: series.len(),
        points: &points[skip..],
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
