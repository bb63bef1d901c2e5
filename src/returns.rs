//! Return and drawdown derivation
//!
//! Pure transformations from an equity value series to daily returns and
//! drawdown statistics. All functions tolerate short or empty inputs by
//! returning empty series or zero, never panicking.

use itertools::Itertools;

use crate::stats;

/// Daily simple returns: entry i = (v[i+1] - v[i]) / v[i].
/// Empty for fewer than 2 samples.
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }

    values.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Fractional decline from the running peak, per sample. Same length as the
/// input; all zeros for a monotonically non-decreasing curve.
pub fn drawdown_series(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;

    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            (peak - v) / peak
        })
        .collect()
}

/// Maximum of the drawdown series (0.0 for an empty curve)
pub fn max_drawdown(values: &[f64]) -> f64 {
    drawdown_series(values).into_iter().fold(0.0, f64::max)
}

/// Mean of the drawdown series (0.0 for an empty curve)
pub fn average_drawdown(values: &[f64]) -> f64 {
    stats::mean(&drawdown_series(values))
}

/// Length in samples of the longest contiguous run with drawdown > 0.
/// Ties are broken by the first-found longest run.
pub fn drawdown_duration(values: &[f64]) -> usize {
    let dd = drawdown_series(values);

    let mut longest = 0;
    for (in_drawdown, run) in &dd.into_iter().chunk_by(|&d| d > 0.0) {
        if in_drawdown {
            longest = longest.max(run.count());
        }
    }

    longest
}
