// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The first EMA value, at index `period - 1`, is seeded with the SMA of the
// first `period` closes.  Earlier positions are undefined.
// =============================================================================

/// Compute the EMA of `closes`, aligned 1:1 with the input.
///
/// Positions before `period - 1` are `None`.  A period of 1 reproduces the
/// input.  The caller guarantees `period >= 1`; a zero period yields an
/// all-`None` series.
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return result;
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let sma = closes[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(sma);

    let mut prev_ema = sma;
    for (i, &close) in closes.iter().enumerate().skip(period) {
        let ema = close * multiplier + prev_ema * (1.0 - multiplier);
        result[i] = Some(ema);
        prev_ema = ema;
    }

    result
}
