// =============================================================================
// Indicator Engine
// =============================================================================
//
// Computes every indicator the signal layer consumes over one normalised
// series.  The four computations only share the input closes; each one owns
// its output buffer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ema::calculate_ema;
use super::rsi::calculate_rsi;
use super::sma::calculate_sma;
use crate::error::SignalError;
use crate::market_data::Series;

/// Window of the SMA that smooths the RSI into its baseline.
pub const RSI_BASELINE_WINDOW: usize = 14;

/// Look-back periods for the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_ema_fast_period")]
    pub ema_fast_period: usize,
    #[serde(default = "default_ema_slow_period")]
    pub ema_slow_period: usize,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
}

fn default_ema_fast_period() -> usize {
    5
}

fn default_ema_slow_period() -> usize {
    20
}

fn default_rsi_period() -> usize {
    14
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_fast_period: default_ema_fast_period(),
            ema_slow_period: default_ema_slow_period(),
            rsi_period: default_rsi_period(),
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), SignalError> {
        SignalError::require_positive("ema_fast_period", self.ema_fast_period)?;
        SignalError::require_positive("ema_slow_period", self.ema_slow_period)?;
        SignalError::require_positive("rsi_period", self.rsi_period)?;
        Ok(())
    }
}

/// Indicator values aligned 1:1 with series positions.  `None` marks
/// insufficient look-back.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndicatorFrame {
    pub ema_fast: Vec<Option<f64>>,
    pub ema_slow: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub rsi_baseline: Vec<Option<f64>>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }
}

/// Compute EMA fast/slow, RSI and the RSI baseline over `series.close`.
pub fn compute_indicators(
    series: &Series,
    ema_fast_period: usize,
    ema_slow_period: usize,
    rsi_period: usize,
) -> Result<IndicatorFrame, SignalError> {
    IndicatorParams {
        ema_fast_period,
        ema_slow_period,
        rsi_period,
    }
    .validate()?;

    let closes = series.closes();

    let ema_fast = calculate_ema(&closes, ema_fast_period);
    let ema_slow = calculate_ema(&closes, ema_slow_period);
    let rsi = calculate_rsi(&closes, rsi_period);
    let rsi_baseline = calculate_sma(&rsi, RSI_BASELINE_WINDOW);

    debug!(
        bars = closes.len(),
        ema_fast_period,
        ema_slow_period,
        rsi_period,
        rsi_defined = rsi.iter().filter(|v| v.is_some()).count(),
        baseline_defined = rsi_baseline.iter().filter(|v| v.is_some()).count(),
        "indicators computed"
    );

    Ok(IndicatorFrame {
        ema_fast,
        ema_slow,
        rsi,
        rsi_baseline,
    })
}

/// [`compute_indicators`] with a parameter bundle.
pub fn compute_with(
    series: &Series,
    params: &IndicatorParams,
) -> Result<IndicatorFrame, SignalError> {
    compute_indicators(
        series,
        params.ema_fast_period,
        params.ema_slow_period,
        params.rsi_period,
    )
}
