// =============================================================================
// stockplan — Main Entry Point
// =============================================================================
//
// Loads a bar file, runs the signal pipeline over the whole series and prints
// the chart report for the trailing display window as JSON on stdout.  Logs
// go to stderr.
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockplan::market_data::load_bars;
use stockplan::{ChartReport, Interval, RuntimeConfig};

#[derive(Debug, Parser)]
#[clap(name = "stockplan", version)]
struct Cli {
    /// JSON array of bars exported from the market-data provider
    #[clap(long)]
    bars: PathBuf,

    /// Runtime config file; defaults are used when it is missing
    #[clap(long, default_value = "stockplan_config.json")]
    config: PathBuf,

    /// Override the ticker symbol from the config
    #[clap(long)]
    symbol: Option<String>,

    /// Override the bar interval from the config (e.g. 1d, 1h)
    #[clap(long)]
    interval: Option<Interval>,

    /// Override the number of trailing bars in the report
    #[clap(long)]
    candles: Option<usize>,
}

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ── 2. Config ────────────────────────────────────────────────────────
    let mut config = RuntimeConfig::load(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    if let Some(symbol) = cli.symbol {
        config.symbol = symbol.trim().to_uppercase();
    }
    if let Some(interval) = cli.interval {
        config.interval = interval;
    }
    if let Some(candles) = cli.candles {
        config.display_candles = candles;
    }
    config.validate().context("invalid runtime config")?;

    info!(
        symbol = %config.symbol,
        interval = %config.interval,
        display_candles = config.display_candles,
        params = ?config.indicator_params,
        "Configured analysis"
    );

    // ── 3. Pipeline ──────────────────────────────────────────────────────
    let raw = load_bars(&cli.bars)?;
    let analysis = stockplan::run(&raw, &config.indicator_params)
        .with_context(|| format!("analysis failed for {}", config.symbol))?;

    // ── 4. Report ────────────────────────────────────────────────────────
    let window = analysis.window(config.display_candles)?;
    let report = ChartReport::build(config.symbol.clone(), config.interval, &window);

    info!(
        bars = report.bars.len(),
        long_signals = report.long_signal_timestamps.len(),
        "Report ready"
    );

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");

    Ok(())
}
