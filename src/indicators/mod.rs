// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the signal
// layer.  Every series is returned aligned 1:1 with its input, with `None`
// marking positions that lack enough look-back.

pub mod ema;
pub mod frame;
pub mod rsi;
pub mod sma;

pub use frame::{
    compute_indicators, compute_with, IndicatorFrame, IndicatorParams, RSI_BASELINE_WINDOW,
};
