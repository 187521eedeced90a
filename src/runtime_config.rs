// =============================================================================
// Runtime Configuration — caller-owned analysis settings
// =============================================================================
//
// Everything one analysis run depends on lives in this object and is passed
// explicitly into the pipeline; nothing is remembered between runs.  Changing
// the symbol or any period simply means building a new config and
// recomputing.
//
// All fields carry `#[serde(default)]` so that a partial JSON file still
// loads.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SignalError;
use crate::indicators::IndicatorParams;
use crate::types::Interval;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_display_candles() -> usize {
    300
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Ticker the bars belong to; carried through to the report.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Bar interval of the input file.
    #[serde(default)]
    pub interval: Interval,

    /// Number of trailing bars included in the chart report.  Indicators are
    /// always computed over the full input.
    #[serde(default = "default_display_candles")]
    pub display_candles: usize,

    /// EMA / RSI look-back periods.
    #[serde(default)]
    pub indicator_params: IndicatorParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            interval: Interval::default(),
            display_candles: default_display_candles(),
            indicator_params: IndicatorParams::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            interval = %config.interval,
            "runtime config loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SignalError> {
        self.indicator_params.validate()?;
        SignalError::require_positive("display_candles", self.display_candles)?;
        Ok(())
    }
}
