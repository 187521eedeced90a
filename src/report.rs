// =============================================================================
// Chart Report — serialisable hand-off to the rendering layer
// =============================================================================
//
// Flattens an analysis window into per-bar rows (OHLC + indicators + marker
// flags), shaded momentum intervals and long-signal timestamps.  Positions
// are relative to the first bar of the window; `window_offset` maps them back
// to the full series.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analysis::AnalysisWindow;
use crate::indicators::IndicatorParams;
use crate::signals::{SignalEvent, SignalKind};
use crate::types::Interval;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub position: usize,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_baseline: Option<f64>,
    pub cond_momentum: bool,
    pub cond_trend: bool,
    pub cond_crossover: bool,
    pub long_signal: bool,
    pub momentum_rising_edge: bool,
    pub trend_rising_edge: bool,
}

/// A momentum interval with the timestamps the renderer shades between.
///
/// When the interval runs to the end of the window, `end_timestamp` is the
/// last bar's timestamp since there is no bar at `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadedInterval {
    pub start: usize,
    pub end: usize,
    pub start_timestamp: NaiveDateTime,
    pub end_timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub symbol: String,
    pub interval: Interval,
    pub params: IndicatorParams,
    pub total_bars: usize,
    pub window_offset: usize,
    pub bars: Vec<ChartBar>,
    pub momentum_intervals: Vec<ShadedInterval>,
    pub events: Vec<SignalEvent>,
    pub long_signal_timestamps: Vec<NaiveDateTime>,
}

impl ChartReport {
    pub fn build(
        symbol: impl Into<String>,
        interval: Interval,
        window: &AnalysisWindow<'_>,
    ) -> Self {
        let analysis = window.analysis();
        let offset = window.offset();
        let ind = &analysis.indicators;
        let sig = &analysis.signals;

        let bars: Vec<ChartBar> = window
            .positions()
            .zip(window.bars())
            .map(|(i, bar)| ChartBar {
                position: i - offset,
                timestamp: bar.timestamp,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                adj_close: bar.adj_close,
                ema_fast: ind.ema_fast.get(i).copied().flatten(),
                ema_slow: ind.ema_slow.get(i).copied().flatten(),
                rsi: ind.rsi.get(i).copied().flatten(),
                rsi_baseline: ind.rsi_baseline.get(i).copied().flatten(),
                cond_momentum: flag(&sig.cond_momentum, i),
                cond_trend: flag(&sig.cond_trend, i),
                cond_crossover: flag(&sig.cond_crossover, i),
                long_signal: flag(&sig.long_signal, i),
                momentum_rising_edge: flag(&sig.momentum_rising_edge, i),
                trend_rising_edge: flag(&sig.trend_rising_edge, i),
            })
            .collect();

        let momentum_intervals = window
            .momentum_intervals()
            .into_iter()
            .filter_map(|iv| {
                let start_timestamp = bars.get(iv.start)?.timestamp;
                let end_timestamp = bars.get(iv.end).or_else(|| bars.last())?.timestamp;
                Some(ShadedInterval {
                    start: iv.start,
                    end: iv.end,
                    start_timestamp,
                    end_timestamp,
                })
            })
            .collect();

        let events = window.events();
        let long_signal_timestamps = events
            .iter()
            .filter(|e| e.kind == SignalKind::Long)
            .map(|e| e.timestamp)
            .collect();

        Self {
            symbol: symbol.into(),
            interval,
            params: analysis.params,
            total_bars: analysis.series.len(),
            window_offset: offset,
            bars,
            momentum_intervals,
            events,
            long_signal_timestamps,
        }
    }
}

/// A flag missing from a shorter signal column reads as not set.
fn flag(flags: &[bool], i: usize) -> bool {
    flags.get(i).copied().unwrap_or(false)
}
