use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A bar exactly as delivered by the market-data provider.
///
/// Every price is optional so that an absent column can be reported as a
/// missing field instead of silently defaulting.  Column names used by the
/// provider's tabular export (`Open`, `Adj Close`, ...) are accepted as
/// aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    #[serde(alias = "Date", alias = "Datetime", deserialize_with = "de_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default, alias = "Open")]
    pub open: Option<f64>,
    #[serde(default, alias = "High")]
    pub high: Option<f64>,
    #[serde(default, alias = "Low")]
    pub low: Option<f64>,
    #[serde(default, alias = "Close")]
    pub close: Option<f64>,
    #[serde(default, alias = "Adj Close", alias = "adjusted_close")]
    pub adj_close: Option<f64>,
}

impl RawBar {
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Saturday and Sunday bars are not trading sessions.
    pub fn is_trading_day(&self) -> bool {
        !matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// A validated OHLC bar.  `adj_close` is kept separately from `close`: the
/// two diverge across splits and dividends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
}

/// Position-indexed bar sequence produced by the normalizer.
///
/// Positions run `0..len()`; the provider timestamp lives on each bar rather
/// than acting as the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    bars: Vec<PriceBar>,
}

impl Series {
    pub(crate) fn from_bars(bars: Vec<PriceBar>) -> Self {
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn timestamp(&self, position: usize) -> Option<NaiveDateTime> {
        self.bars.get(position).map(|b| b.timestamp)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn adj_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adj_close).collect()
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Accept full timestamps (`2024-01-02T15:30:00`, `2024-01-02 15:30:00`) as
/// well as bare dates, which daily exports use.  Bare dates map to midnight.
/// Intraday exports carry a UTC offset; those keep their exchange-local wall
/// clock so the weekday filter sees the session's own date.
fn de_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
}

pub(crate) fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_local());
    }
    if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(ts.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
