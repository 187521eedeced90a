// =============================================================================
// Momentum intervals — contiguous runs used for chart shading
// =============================================================================

use serde::{Deserialize, Serialize};

use super::fusion::SignalFrame;

/// Closed-open position range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInterval {
    pub start: usize,
    pub end: usize,
}

impl SignalInterval {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn contains(&self, position: usize) -> bool {
        (self.start..self.end).contains(&position)
    }
}

/// Maximal runs where `cond_momentum` holds.
pub fn momentum_intervals(signals: &SignalFrame) -> Vec<SignalInterval> {
    true_runs(&signals.cond_momentum)
}

/// Maximal runs of `true`.  A run still open at the end closes at `len`.
pub fn true_runs(flags: &[bool]) -> Vec<SignalInterval> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(SignalInterval { start: s, end: i });
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push(SignalInterval {
            start: s,
            end: flags.len(),
        });
    }

    runs
}
