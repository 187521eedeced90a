// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A zero average loss gives RSI = 100, including a perfectly flat window.
// =============================================================================

/// Compute the RSI of `closes`, aligned 1:1 with the input.
///
/// The first `period` positions are `None` (they are consumed to seed the
/// averages); the first value lands at index `period`.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return result;
    }

    // --- Compute price deltas ------------------------------------------------
    // deltas[k] is the change from closes[k] to closes[k + 1].
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // --- Seed averages with SMA of first `period` deltas ---------------------
    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| (g + gain(d), l + loss(d)));

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;
    result[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    // --- Wilder's smoothing for subsequent values ----------------------------
    for (k, &delta) in deltas.iter().enumerate().skip(period) {
        avg_gain = (avg_gain * (period_f - 1.0) + gain(delta)) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss(delta)) / period_f;
        result[k + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    result
}

// =============================================================================
// Internal helpers
// =============================================================================

fn gain(delta: f64) -> f64 {
    delta.max(0.0)
}

fn loss(delta: f64) -> f64 {
    (-delta).max(0.0)
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn defined(series: &[Option<f64>]) -> Vec<f64> {
        series.iter().flatten().copied().collect()
    }

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_insufficient_data() {
        // Need period+1 closes (period deltas). 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(calculate_rsi(&closes, 14).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_first_value_at_period() {
        let closes: Vec<f64> = (1..=20).map(|x| (x as f64).sin() + 10.0).collect();
        let series = calculate_rsi(&closes, 14);
        assert!(series[..14].iter().all(Option::is_none));
        assert!(series[14..].iter().all(Option::is_some));
    }

    #[test]
    fn rsi_all_gains() {
        // Strictly ascending prices => RSI should be 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let series = defined(&calculate_rsi(&closes, 14));
        assert_eq!(series.len(), 16);
        for &v in &series {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses() {
        // Strictly descending prices => RSI should be 0.
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = defined(&calculate_rsi(&closes, 14));
        assert!(!series.is_empty());
        for &v in &series {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_has_no_losses() {
        let closes = vec![100.0; 30];
        let series = defined(&calculate_rsi(&closes, 14));
        assert!(series.iter().all(|&v| v == 100.0));
    }

    #[test]
    fn rsi_wilder_smoothing_step() {
        // period 2: deltas +2, -1, +3
        // seed: gain 1.0, loss 0.5 => RSI = 100 - 100/3
        // next: gain (1*1 + 3)/2 = 2.0, loss (0.5*1 + 0)/2 = 0.25 => RS 8
        let series = calculate_rsi(&[10.0, 12.0, 11.0, 14.0], 2);
        assert_eq!(series[..2], [None::<f64>, None]);
        assert!((series[2].unwrap() - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
        assert!((series[3].unwrap() - (100.0 - 100.0 / 9.0)).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn rsi_stays_within_bounds(
            closes in prop::collection::vec(1.0..1_000.0f64, 0..80),
            period in 1..20usize,
        ) {
            for v in calculate_rsi(&closes, period).into_iter().flatten() {
                prop_assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
            }
        }
    }
}
