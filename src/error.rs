// =============================================================================
// Errors raised by the signal pipeline
// =============================================================================
//
// Every variant is a caller-input defect: the core performs no I/O, so there is
// nothing transient to retry.  Numeric edge cases (insufficient lookback, zero
// average loss) are NOT errors; they surface as undefined indicator values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("no bars left after normalisation")]
    EmptySeries,

    #[error("bar {position} is missing required field `{field}`")]
    MissingField { field: &'static str, position: usize },

    #[error("invalid parameter `{name}`: {value} (must be positive)")]
    InvalidParameter { name: &'static str, value: usize },
}

impl SignalError {
    /// Reject a zero-valued period or window.
    pub fn require_positive(name: &'static str, value: usize) -> Result<usize, Self> {
        if value == 0 {
            Err(Self::InvalidParameter { name, value })
        } else {
            Ok(value)
        }
    }
}
