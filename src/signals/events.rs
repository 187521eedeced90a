// =============================================================================
// Signal events — timestamped markers for the chart layer
// =============================================================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::fusion::{true_positions, SignalFrame};
use crate::market_data::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalKind {
    Long,
    MomentumRisingEdge,
    TrendRisingEdge,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "Long"),
            Self::MomentumRisingEdge => write!(f, "MomentumRisingEdge"),
            Self::TrendRisingEdge => write!(f, "TrendRisingEdge"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub position: usize,
    pub timestamp: NaiveDateTime,
    pub kind: SignalKind,
}

/// Collect every long signal and rising edge, ordered by position then kind.
pub fn signal_events(series: &Series, signals: &SignalFrame) -> Vec<SignalEvent> {
    let sources = [
        (SignalKind::Long, &signals.long_signal),
        (SignalKind::MomentumRisingEdge, &signals.momentum_rising_edge),
        (SignalKind::TrendRisingEdge, &signals.trend_rising_edge),
    ];

    let mut events: Vec<SignalEvent> = sources
        .iter()
        .flat_map(|(kind, flags)| {
            true_positions(flags).into_iter().filter_map(move |position| {
                series.timestamp(position).map(|timestamp| SignalEvent {
                    position,
                    timestamp,
                    kind: *kind,
                })
            })
        })
        .collect();

    events.sort_by_key(|e| (e.position, e.kind));
    events
}
