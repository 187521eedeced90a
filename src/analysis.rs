// =============================================================================
// Analysis Pipeline — Normalizer → Indicator Engine → Signal Fusion
// =============================================================================
//
// One call turns raw provider bars into an enriched series plus its signal
// events.  Every stage runs over the full series so look-back stays correct;
// display windowing is a slice taken afterwards (see `Analysis::window`).
// =============================================================================

use std::ops::Range;

use tracing::info;

use crate::error::SignalError;
use crate::indicators::{compute_with, IndicatorFrame, IndicatorParams};
use crate::market_data::{normalize, PriceBar, RawBar, Series};
use crate::signals::{
    compute_signals, momentum_intervals, signal_events, SignalEvent, SignalFrame, SignalInterval,
};

/// Everything the chart layer needs for one (series, parameter set) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub params: IndicatorParams,
    pub series: Series,
    pub indicators: IndicatorFrame,
    pub signals: SignalFrame,
    pub momentum_intervals: Vec<SignalInterval>,
    pub events: Vec<SignalEvent>,
}

/// Run the full pipeline over `raw`.
pub fn run(raw: &[RawBar], params: &IndicatorParams) -> Result<Analysis, SignalError> {
    params.validate()?;

    let series = normalize(raw)?;
    let indicators = compute_with(&series, params)?;
    let signals = compute_signals(&series, &indicators);
    let momentum_intervals = momentum_intervals(&signals);
    let events = signal_events(&series, &signals);

    info!(
        bars = series.len(),
        ema_fast = params.ema_fast_period,
        ema_slow = params.ema_slow_period,
        rsi = params.rsi_period,
        long_signals = signals.long_positions().len(),
        momentum_intervals = momentum_intervals.len(),
        events = events.len(),
        "analysis complete"
    );

    Ok(Analysis {
        params: *params,
        series,
        indicators,
        signals,
        momentum_intervals,
        events,
    })
}

impl Analysis {
    /// View of the last `last_n` bars.  Asking for more bars than exist
    /// yields the whole series.
    pub fn window(&self, last_n: usize) -> Result<AnalysisWindow<'_>, SignalError> {
        SignalError::require_positive("display_candles", last_n)?;
        let len = self.series.len();
        let start = len.saturating_sub(last_n);
        Ok(AnalysisWindow {
            analysis: self,
            range: start..len,
        })
    }
}

// =============================================================================
// AnalysisWindow
// =============================================================================

/// A presentation slice of an [`Analysis`].  Positions reported by the
/// window are relative to its first bar.
#[derive(Debug, Clone)]
pub struct AnalysisWindow<'a> {
    analysis: &'a Analysis,
    range: Range<usize>,
}

impl<'a> AnalysisWindow<'a> {
    pub fn analysis(&self) -> &'a Analysis {
        self.analysis
    }

    /// Absolute series position of the window's first bar.
    pub fn offset(&self) -> usize {
        self.range.start
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn bars(&self) -> &'a [PriceBar] {
        &self.analysis.series.bars()[self.range.clone()]
    }

    /// Absolute series positions covered by the window.
    pub fn positions(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Momentum intervals clipped to the window and rebased to its start.
    pub fn momentum_intervals(&self) -> Vec<SignalInterval> {
        let (start, end) = (self.range.start, self.range.end);
        self.analysis
            .momentum_intervals
            .iter()
            .filter(|iv| iv.end > start && iv.start < end)
            .map(|iv| SignalInterval {
                start: iv.start.max(start) - start,
                end: iv.end.min(end) - start,
            })
            .collect()
    }

    /// Events inside the window, with positions rebased to its start.
    pub fn events(&self) -> Vec<SignalEvent> {
        self.analysis
            .events
            .iter()
            .filter(|e| self.range.contains(&e.position))
            .map(|e| SignalEvent {
                position: e.position - self.range.start,
                ..e.clone()
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::bar::parse_timestamp;
    use crate::signals::SignalKind;
    use chrono::{Datelike, Weekday};

    fn raw_bar(date: &str, close: f64) -> RawBar {
        RawBar {
            timestamp: parse_timestamp(date).unwrap(),
            open: Some(close),
            high: Some(close + 0.5),
            low: Some(close - 0.5),
            close: Some(close),
            adj_close: Some(close),
        }
    }

    /// Weekday daily bars from 2024-01-01 plus one Saturday bar mixed in.
    fn raw_series(closes: &[f64]) -> Vec<RawBar> {
        let mut day = parse_timestamp("2024-01-01").unwrap().date();
        let mut out = Vec::new();
        for &c in closes {
            while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                day = day.succ_opt().unwrap();
            }
            out.push(raw_bar(&day.format("%Y-%m-%d").to_string(), c));
            day = day.succ_opt().unwrap();
        }
        out.insert(out.len().min(5), raw_bar("2024-01-06", 999.0));
        out
    }

    fn dip_then_rally() -> Vec<f64> {
        let mut closes: Vec<f64> = (0..15).map(|i| 120.0 - i as f64).collect();
        closes.extend((0..15).map(|i| 106.0 + 3.0 * i as f64));
        closes
    }

    fn params(fast: usize, slow: usize, rsi: usize) -> IndicatorParams {
        IndicatorParams {
            ema_fast_period: fast,
            ema_slow_period: slow,
            rsi_period: rsi,
        }
    }

    #[test]
    fn pipeline_drops_weekend_bar_before_computing() {
        let analysis = run(&raw_series(&dip_then_rally()), &params(3, 8, 5)).unwrap();
        assert_eq!(analysis.series.len(), 30);
        assert!(analysis.series.closes().iter().all(|&c| c != 999.0));
        assert_eq!(analysis.indicators.len(), 30);
        assert_eq!(analysis.signals.len(), 30);
    }

    #[test]
    fn pipeline_surfaces_input_errors() {
        assert_eq!(
            run(&[raw_bar("2024-01-06", 1.0)], &IndicatorParams::default()),
            Err(SignalError::EmptySeries)
        );
        assert!(matches!(
            run(&raw_series(&[1.0, 2.0]), &params(5, 0, 14)),
            Err(SignalError::InvalidParameter { name: "ema_slow_period", .. })
        ));
    }

    #[test]
    fn events_mirror_signal_flags() {
        let analysis = run(&raw_series(&dip_then_rally()), &params(3, 8, 5)).unwrap();
        let longs: Vec<usize> = analysis
            .events
            .iter()
            .filter(|e| e.kind == SignalKind::Long)
            .map(|e| e.position)
            .collect();
        assert_eq!(longs, analysis.signals.long_positions());
        for e in &analysis.events {
            assert_eq!(Some(e.timestamp), analysis.series.timestamp(e.position));
        }
    }

    #[test]
    fn window_rebases_positions() {
        let analysis = run(&raw_series(&dip_then_rally()), &params(3, 8, 5)).unwrap();
        let window = analysis.window(10).unwrap();
        assert_eq!(window.offset(), 20);
        assert_eq!(window.len(), 10);
        assert_eq!(window.bars()[0], analysis.series.bars()[20]);

        for iv in window.momentum_intervals() {
            assert!(iv.start < iv.end && iv.end <= 10);
            for p in iv.start..iv.end {
                assert!(analysis.signals.cond_momentum[p + 20]);
            }
        }
        for e in window.events() {
            assert!(e.position < 10);
            assert_eq!(
                Some(e.timestamp),
                analysis.series.timestamp(e.position + 20)
            );
        }
    }

    #[test]
    fn window_larger_than_series_is_whole_series() {
        let analysis = run(&raw_series(&dip_then_rally()), &params(3, 8, 5)).unwrap();
        let window = analysis.window(300).unwrap();
        assert_eq!(window.offset(), 0);
        assert_eq!(window.len(), 30);
        assert_eq!(window.momentum_intervals(), analysis.momentum_intervals);
        assert_eq!(window.events(), analysis.events);
    }

    #[test]
    fn zero_window_is_rejected() {
        let analysis = run(&raw_series(&dip_then_rally()), &params(3, 8, 5)).unwrap();
        assert!(matches!(
            analysis.window(0),
            Err(SignalError::InvalidParameter { name: "display_candles", .. })
        ));
    }

    #[test]
    fn clipped_interval_keeps_its_tail() {
        let mut analysis = run(&raw_series(&dip_then_rally()), &params(3, 8, 5)).unwrap();
        analysis.momentum_intervals = vec![
            SignalInterval { start: 2, end: 6 },
            SignalInterval { start: 18, end: 23 },
            SignalInterval { start: 27, end: 30 },
        ];
        let window = analysis.window(10).unwrap();
        assert_eq!(
            window.momentum_intervals(),
            vec![SignalInterval { start: 0, end: 3 }, SignalInterval { start: 7, end: 10 }]
        );
    }
}
