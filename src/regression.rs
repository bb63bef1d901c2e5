//! CAPM regression of portfolio excess returns against benchmark excess returns
//!
//! Ordinary least squares on the excess-return pair: beta is the slope
//! (covariance over benchmark variance), alpha the intercept. Shape
//! mismatches and degenerate benchmarks yield NaN rather than an error.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::stats;

/// Regression intercept and slope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaBeta {
    pub alpha: f64,
    pub beta: f64,
}

impl AlphaBeta {
    /// The undefined result: shape mismatch, missing benchmark, or a
    /// benchmark with zero variance.
    pub fn undefined() -> Self {
        Self {
            alpha: f64::NAN,
            beta: f64::NAN,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite()
    }
}

/// Fit `portfolio_excess = alpha + beta * benchmark_excess` by OLS,
/// where excess = return - risk_free_rate (daily).
pub fn capm_regression(
    portfolio_returns: &[f64],
    benchmark_returns: &[f64],
    risk_free_rate: f64,
) -> AlphaBeta {
    if portfolio_returns.is_empty() || portfolio_returns.len() != benchmark_returns.len() {
        return AlphaBeta::undefined();
    }

    let y: Vec<f64> = portfolio_returns.iter().map(|r| r - risk_free_rate).collect();
    let x: Vec<f64> = benchmark_returns.iter().map(|r| r - risk_free_rate).collect();

    let var_x = x.as_slice().population_variance();
    if var_x == 0.0 || !var_x.is_finite() {
        return AlphaBeta::undefined();
    }

    let cov = x.as_slice().population_covariance(y.as_slice());
    let beta = cov / var_x;
    let alpha = stats::mean(&y) - beta * stats::mean(&x);

    AlphaBeta { alpha, beta }
}

/// Recompute the CAPM regression over every sliding window of `window`
/// consecutive samples. Entry i covers return indices `i..i + window`.
/// Empty when the series is shorter than the window. Windows are
/// independent, so they are fitted in parallel.
pub fn rolling_alpha_beta(
    portfolio_returns: &[f64],
    benchmark_returns: &[f64],
    window: usize,
    risk_free_rate: f64,
) -> Vec<AlphaBeta> {
    if window == 0
        || portfolio_returns.len() != benchmark_returns.len()
        || portfolio_returns.len() < window
    {
        return Vec::new();
    }

    (0..=portfolio_returns.len() - window)
        .into_par_iter()
        .map(|i| {
            capm_regression(
                &portfolio_returns[i..i + window],
                &benchmark_returns[i..i + window],
                risk_free_rate,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_series_gives_unit_beta_zero_alpha() {
        let returns = [0.01, -0.02, 0.015, 0.005, -0.01, 0.02];
        let fit = capm_regression(&returns, &returns, 0.0001);
        assert_relative_eq!(fit.beta, 1.0, epsilon = 1e-10);
        assert_relative_eq!(fit.alpha, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scaled_series_recovers_slope_and_intercept() {
        let benchmark = [0.01, -0.02, 0.015, 0.005, -0.01, 0.02];
        let portfolio: Vec<f64> = benchmark.iter().map(|r| 2.0 * r + 0.001).collect();

        // With rf = 0 the excess returns equal the raw returns, so the fit
        // recovers the construction exactly
        let fit = capm_regression(&portfolio, &benchmark, 0.0);
        assert_relative_eq!(fit.beta, 2.0, epsilon = 1e-10);
        assert_relative_eq!(fit.alpha, 0.001, epsilon = 1e-10);
    }

    #[test]
    fn test_shape_mismatch_is_undefined() {
        let fit = capm_regression(&[0.01, 0.02], &[0.01, 0.02, 0.03], 0.0);
        assert!(fit.alpha.is_nan());
        assert!(fit.beta.is_nan());
    }

    #[test]
    fn test_constant_benchmark_is_undefined() {
        let fit = capm_regression(&[0.01, 0.02, 0.03], &[0.01, 0.01, 0.01], 0.0);
        assert!(!fit.is_defined());
    }

    #[test]
    fn test_empty_series_is_undefined() {
        assert!(!capm_regression(&[], &[], 0.0).is_defined());
    }

    #[test]
    fn test_rolling_window_count() {
        let benchmark: Vec<f64> = (0..9).map(|i| 0.01 * ((i % 3) as f64 - 1.0)).collect();
        let portfolio: Vec<f64> = benchmark.iter().map(|r| 1.5 * r).collect();

        let rolling = rolling_alpha_beta(&portfolio, &benchmark, 5, 0.0);
        assert_eq!(rolling.len(), 5);
        for fit in &rolling {
            assert_relative_eq!(fit.beta, 1.5, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_rolling_short_series_is_empty() {
        let returns = [0.01, 0.02, 0.03];
        assert!(rolling_alpha_beta(&returns, &returns, 5, 0.0).is_empty());
        assert!(rolling_alpha_beta(&returns, &returns, 0, 0.0).is_empty());
    }
}
