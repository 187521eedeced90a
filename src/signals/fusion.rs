// =============================================================================
// Signal Fusion — per-bar conditions and the composite long signal
// =============================================================================
//
// Conditions (undefined operands always evaluate to false):
//   momentum   rsi >= rsi_baseline
//   trend      adj_close >= ema_slow
//   crossover  ema_fast crossed above ema_slow at this bar
//   long       momentum AND trend AND crossover, all on the same bar
//
// Rising edges fire on the bar where the momentum / trend relation flips from
// "below" to "at or above".  Nothing that looks back fires at position 0.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::indicators::IndicatorFrame;
use crate::market_data::Series;

/// Boolean per-bar outputs, aligned 1:1 with series positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SignalFrame {
    pub cond_momentum: Vec<bool>,
    pub cond_trend: Vec<bool>,
    pub cond_crossover: Vec<bool>,
    pub long_signal: Vec<bool>,
    pub momentum_rising_edge: Vec<bool>,
    pub trend_rising_edge: Vec<bool>,
}

impl SignalFrame {
    pub fn len(&self) -> usize {
        self.long_signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.long_signal.is_empty()
    }

    /// Positions where the composite long signal fired.
    pub fn long_positions(&self) -> Vec<usize> {
        true_positions(&self.long_signal)
    }
}

/// The composite entry rule: an instantaneous three-way AND.
pub fn is_long(momentum: bool, trend: bool, crossover: bool) -> bool {
    momentum && trend && crossover
}

/// Fuse `frame` into per-bar conditions over the positions of `series`.
///
/// Positions missing from a shorter indicator array count as undefined.
pub fn compute_signals(series: &Series, frame: &IndicatorFrame) -> SignalFrame {
    let n = series.len();
    let adj_close: Vec<Option<f64>> = series.bars().iter().map(|b| Some(b.adj_close)).collect();

    let mut out = SignalFrame {
        cond_momentum: vec![false; n],
        cond_trend: vec![false; n],
        cond_crossover: vec![false; n],
        long_signal: vec![false; n],
        momentum_rising_edge: vec![false; n],
        trend_rising_edge: vec![false; n],
    };

    for i in 0..n {
        let momentum = at_or_above(&frame.rsi, &frame.rsi_baseline, i);
        let trend = at_or_above(&adj_close, &frame.ema_slow, i);
        let crossover = crossed_above(&frame.ema_fast, &frame.ema_slow, i);

        out.cond_momentum[i] = momentum;
        out.cond_trend[i] = trend;
        out.cond_crossover[i] = crossover;
        out.long_signal[i] = is_long(momentum, trend, crossover);
        out.momentum_rising_edge[i] = crossed_above(&frame.rsi, &frame.rsi_baseline, i);
        out.trend_rising_edge[i] = crossed_above(&adj_close, &frame.ema_slow, i);
    }

    debug!(
        bars = n,
        long_signals = count(&out.long_signal),
        crossovers = count(&out.cond_crossover),
        momentum_edges = count(&out.momentum_rising_edge),
        trend_edges = count(&out.trend_rising_edge),
        "signals fused"
    );

    out
}

// =============================================================================
// Internal helpers
// =============================================================================

fn value(series: &[Option<f64>], i: usize) -> Option<f64> {
    series.get(i).copied().flatten()
}

/// `a[i] >= b[i]`, false when either side is undefined.
fn at_or_above(a: &[Option<f64>], b: &[Option<f64>], i: usize) -> bool {
    match (value(a, i), value(b, i)) {
        (Some(x), Some(y)) => x >= y,
        _ => false,
    }
}

/// `a[i] < b[i]`, false when either side is undefined.
fn below(a: &[Option<f64>], b: &[Option<f64>], i: usize) -> bool {
    match (value(a, i), value(b, i)) {
        (Some(x), Some(y)) => x < y,
        _ => false,
    }
}

fn crossed_above(a: &[Option<f64>], b: &[Option<f64>], i: usize) -> bool {
    i > 0 && below(a, b, i - 1) && at_or_above(a, b, i)
}

fn count(flags: &[bool]) -> usize {
    flags.iter().filter(|&&f| f).count()
}

pub(crate) fn true_positions(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &f)| f.then_some(i))
        .collect()
}
