// =============================================================================
// Bar Normalizer
// =============================================================================
//
// Turns the provider's raw bar list into a clean, position-indexed Series:
//   1. Drop Saturday/Sunday bars (intraday feeds do not always filter them).
//   2. Require every price field on the bars that remain.
//   3. Re-index to contiguous positions 0..n-1.
//
// Ordering and uniqueness of timestamps are taken as delivered.
// =============================================================================

use tracing::debug;

use super::bar::{PriceBar, RawBar, Series};
use crate::error::SignalError;

/// Normalise `raw` into a [`Series`].
///
/// Fails with [`SignalError::EmptySeries`] when nothing survives the weekday
/// filter and with [`SignalError::MissingField`] when a kept bar lacks a price.
/// The reported position is the bar's index in `raw`.
pub fn normalize(raw: &[RawBar]) -> Result<Series, SignalError> {
    let mut bars = Vec::with_capacity(raw.len());

    for (position, bar) in raw.iter().enumerate() {
        if !bar.is_trading_day() {
            continue;
        }
        bars.push(to_price_bar(bar, position)?);
    }

    debug!(
        raw = raw.len(),
        kept = bars.len(),
        dropped = raw.len() - bars.len(),
        "normalised bar series"
    );

    if bars.is_empty() {
        return Err(SignalError::EmptySeries);
    }

    Ok(Series::from_bars(bars))
}

fn to_price_bar(bar: &RawBar, position: usize) -> Result<PriceBar, SignalError> {
    let require = |value: Option<f64>, field: &'static str| {
        value.ok_or(SignalError::MissingField { field, position })
    };

    Ok(PriceBar {
        timestamp: bar.timestamp,
        open: require(bar.open, "open")?,
        high: require(bar.high, "high")?,
        low: require(bar.low, "low")?,
        close: require(bar.close, "close")?,
        // Never fall back to `close`: the trend condition depends on it.
        adj_close: require(bar.adj_close, "adj_close")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::bar::parse_timestamp;

    fn raw(date: &str, close: f64) -> RawBar {
        RawBar {
            timestamp: parse_timestamp(date).unwrap(),
            open: Some(close),
            high: Some(close + 1.0),
            low: Some(close - 1.0),
            close: Some(close),
            adj_close: Some(close),
        }
    }

    #[test]
    fn weekend_bars_are_dropped_and_reindexed() {
        // 2024-01-05 Fri, 06 Sat, 07 Sun, 08 Mon.
        let input = vec![
            raw("2024-01-05", 1.0),
            raw("2024-01-06", 2.0),
            raw("2024-01-07", 3.0),
            raw("2024-01-08", 4.0),
        ];
        let series = normalize(&input).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.0, 4.0]);
        assert_eq!(series.timestamp(1), parse_timestamp("2024-01-08"));
    }

    #[test]
    fn weekend_only_input_is_empty() {
        let input = vec![raw("2024-01-06", 1.0), raw("2024-01-07", 2.0)];
        assert_eq!(normalize(&input), Err(SignalError::EmptySeries));
        assert_eq!(normalize(&[]), Err(SignalError::EmptySeries));
    }

    #[test]
    fn missing_adj_close_is_an_error() {
        let mut bad = raw("2024-01-09", 5.0);
        bad.adj_close = None;
        let input = vec![raw("2024-01-08", 4.0), bad];
        assert_eq!(
            normalize(&input),
            Err(SignalError::MissingField {
                field: "adj_close",
                position: 1
            })
        );
    }

    #[test]
    fn first_absent_field_is_reported() {
        let mut bad = raw("2024-01-08", 4.0);
        bad.high = None;
        bad.close = None;
        bad.adj_close = None;
        let input = vec![raw("2024-01-05", 1.0), raw("2024-01-06", 2.0), bad];
        assert_eq!(
            normalize(&input),
            Err(SignalError::MissingField {
                field: "high",
                position: 2
            })
        );

        let mut no_open = raw("2024-01-08", 4.0);
        no_open.open = None;
        no_open.low = None;
        assert_eq!(
            normalize(&[no_open]),
            Err(SignalError::MissingField {
                field: "open",
                position: 0
            })
        );

        let mut no_close = raw("2024-01-08", 4.0);
        no_close.close = None;
        assert_eq!(
            normalize(&[no_close]),
            Err(SignalError::MissingField {
                field: "close",
                position: 0
            })
        );
    }

    #[test]
    fn missing_field_on_weekend_bar_is_ignored() {
        let mut weekend = raw("2024-01-06", 2.0);
        weekend.close = None;
        let input = vec![raw("2024-01-05", 1.0), weekend];
        assert_eq!(normalize(&input).unwrap().len(), 1);
    }

    #[test]
    fn adj_close_is_kept_distinct_from_close() {
        let mut bar = raw("2024-01-08", 100.0);
        bar.adj_close = Some(97.5);
        let series = normalize(&[bar]).unwrap();
        assert_eq!(series.closes(), vec![100.0]);
        assert_eq!(series.adj_closes(), vec![97.5]);
    }
}
