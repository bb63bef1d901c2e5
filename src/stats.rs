//! Descriptive statistics over return series
//!
//! Thin wrappers over `statrs` plus the standardized-moment and tail-risk
//! measures the report needs. Conventions: empty input yields 0.0 for mean
//! and standard deviation (the neutral-value contract for short curves),
//! NaN for shape and tail statistics.

use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Arithmetic mean (0.0 for an empty series)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.mean()
}

/// Population standard deviation (0.0 for an empty series)
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.population_std_dev()
}

/// Population standard deviation of the strictly negative entries.
/// 0.0 when none are negative.
pub fn downside_std(values: &[f64]) -> f64 {
    let downside: Vec<f64> = values.iter().copied().filter(|v| *v < 0.0).collect();
    population_std(&downside)
}

/// Third standardized moment, biased estimator (m3 / m2^1.5).
/// NaN for an empty or constant series.
pub fn skewness(values: &[f64]) -> f64 {
    let (m2, m3, _) = central_moments(values);
    if m2 == 0.0 {
        return f64::NAN;
    }
    m3 / m2.powf(1.5)
}

/// Excess kurtosis, biased estimator (m4 / m2^2 - 3).
/// NaN for an empty or constant series.
pub fn kurtosis(values: &[f64]) -> f64 {
    let (m2, _, m4) = central_moments(values);
    if m2 == 0.0 {
        return f64::NAN;
    }
    m4 / (m2 * m2) - 3.0
}

/// Value-at-Risk: the empirical alpha-quantile of the series.
/// NaN for an empty series.
pub fn value_at_risk(values: &[f64], alpha: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut data = Data::new(values.to_vec());
    data.quantile(alpha)
}

/// Conditional Value-at-Risk: mean of all entries at or below the VaR
/// cutoff. NaN for an empty series. Always <= VaR when both are defined.
pub fn conditional_value_at_risk(values: &[f64], alpha: f64) -> f64 {
    let var = value_at_risk(values, alpha);
    if var.is_nan() {
        return f64::NAN;
    }

    let tail: Vec<f64> = values.iter().copied().filter(|v| *v <= var).collect();
    if tail.is_empty() {
        return f64::NAN;
    }
    mean(&tail)
}

/// Second, third, and fourth central moments
fn central_moments(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let m = mean(values);
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);

    for v in values {
        let d = v - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }

    (m2 / n, m3 / n, m4 / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let values = [0.05, 0.047619047619047616];
        assert_relative_eq!(mean(&values), 0.048809523809523806, epsilon = 1e-12);
        // Population std of a two-element sample is half the spread
        assert_relative_eq!(
            population_std(&values),
            (0.05 - 0.047619047619047616) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_empty_series_neutral_values() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std(&[]), 0.0);
        assert_eq!(downside_std(&[]), 0.0);
        assert!(skewness(&[]).is_nan());
        assert!(kurtosis(&[]).is_nan());
        assert!(value_at_risk(&[], 0.05).is_nan());
        assert!(conditional_value_at_risk(&[], 0.05).is_nan());
    }

    #[test]
    fn test_downside_std_ignores_gains() {
        let values = [0.1, -0.05, 0.02, -0.01];
        assert_relative_eq!(downside_std(&values), 0.02, epsilon = 1e-12);
        assert_eq!(downside_std(&[0.01, 0.02, 0.0]), 0.0);
    }

    #[test]
    fn test_skewness_symmetric_series_is_zero() {
        let values = [1.0, -1.0, 1.0, -1.0];
        assert_relative_eq!(skewness(&values), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kurtosis_two_point_distribution() {
        // Equal mass at +-1: m2 = 1, m4 = 1, excess kurtosis = -2
        let values = [1.0, -1.0, 1.0, -1.0];
        assert_relative_eq!(kurtosis(&values), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_has_undefined_shape() {
        let values = [0.01; 10];
        assert!(skewness(&values).is_nan());
        assert!(kurtosis(&values).is_nan());
    }

    #[test]
    fn test_cvar_at_or_below_var() {
        let values = [
            -0.08, -0.03, -0.01, 0.0, 0.005, 0.01, 0.012, 0.02, 0.03, 0.04, -0.02, 0.015, 0.007,
            -0.006, 0.022, 0.001, -0.013, 0.018, 0.009, -0.004,
        ];
        let var = value_at_risk(&values, 0.05);
        let cvar = conditional_value_at_risk(&values, 0.05);
        assert!(var.is_finite());
        assert!(cvar <= var);
    }

    #[test]
    fn test_var_within_sample_range() {
        let values = [-0.02, -0.01, 0.0, 0.01, 0.02];
        let var = value_at_risk(&values, 0.05);
        assert!(var >= -0.02 && var <= 0.02);
    }
}
