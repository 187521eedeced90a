// =============================================================================
// Simple Moving Average over a partially-defined series
// =============================================================================
//
// Used to build the RSI baseline: the SMA at position i is defined only when
// all `window` inputs ending at i are defined.  Undefined inputs never count
// as zero.

/// Rolling mean of `values` over `window` positions, aligned 1:1 with input.
pub fn calculate_sma(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    for end in window..=values.len() {
        let slice = &values[end - window..end];
        if slice.iter().all(Option::is_some) {
            let sum: f64 = slice.iter().flatten().sum();
            result[end - 1] = Some(sum / window as f64);
        }
    }

    result
}
