use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::bar::RawBar;

/// Read a JSON array of bars exported from the market-data provider.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<RawBar>> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bars from {}", path.display()))?;

    let bars = parse_bars(&content)
        .with_context(|| format!("failed to parse bars from {}", path.display()))?;

    info!(path = %path.display(), bars = bars.len(), "bars loaded");
    Ok(bars)
}

pub fn parse_bars(json: &str) -> Result<Vec<RawBar>> {
    serde_json::from_str(json).context("bar file must be a JSON array of bar objects")
}
