// =============================================================================
// Signals Module
// =============================================================================
//
// Signal fusion over a computed indicator frame:
// - Per-bar momentum / trend / crossover conditions and the long signal
// - Momentum intervals for chart shading
// - Timestamped signal events

pub mod events;
pub mod fusion;
pub mod intervals;

pub use events::{signal_events, SignalEvent, SignalKind};
pub use fusion::{compute_signals, is_long, SignalFrame};
pub use intervals::{momentum_intervals, SignalInterval};
