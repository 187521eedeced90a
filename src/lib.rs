// =============================================================================
// stockplan — technical-analysis signal engine for equity bar series
// =============================================================================
//
// Raw provider bars flow through three pure stages:
//   market_data::normalize   weekday filter, field validation, re-indexing
//   indicators               EMA fast/slow, Wilder RSI, SMA(14) RSI baseline
//   signals                  momentum / trend / crossover fusion, edges,
//                            momentum intervals, timestamped events
// `analysis::run` chains them; `report` flattens a display window for the
// chart layer.
// =============================================================================

pub mod analysis;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod report;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use analysis::{run, Analysis, AnalysisWindow};
pub use error::SignalError;
pub use indicators::{compute_indicators, IndicatorFrame, IndicatorParams};
pub use market_data::{normalize, PriceBar, RawBar, Series};
pub use report::ChartReport;
pub use runtime_config::RuntimeConfig;
pub use signals::{compute_signals, SignalEvent, SignalFrame, SignalInterval};
pub use types::Interval;
