//! Performance metrics computation
//!
//! `PerformanceAnalyzer` owns one equity value series (and optionally a
//! benchmark series), derives the return series once, and exposes one
//! method per metric plus `calculate_all` to aggregate everything into a
//! [`PerformanceReport`]. Stateless beyond the input copies: every method
//! is a pure function of the construction inputs.

use crate::regression::{self, AlphaBeta};
use crate::returns;
use crate::stats;
use crate::types::{EquityCurve, PerformanceReport};

/// Annualisation factor for daily data
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default quantile for VaR/CVaR
pub const DEFAULT_VAR_ALPHA: f64 = 0.05;

/// Skewness, kurtosis, and tail risk of a return distribution
#[derive(Debug, Clone, Copy)]
pub struct DistributionStats {
    pub skewness: f64,
    pub kurtosis: f64,
    pub var: f64,
    pub cvar: f64,
}

/// Performance metrics calculator over a portfolio equity series and an
/// optional benchmark equity series.
pub struct PerformanceAnalyzer {
    portfolio: Vec<f64>,
    benchmark: Option<Vec<f64>>,
    returns: Vec<f64>,
    benchmark_returns: Option<Vec<f64>>,
    /// Daily risk-free rate
    risk_free_rate: f64,
    var_alpha: f64,
}

impl PerformanceAnalyzer {
    /// Create an analyzer from raw equity value series.
    ///
    /// `risk_free_rate` is the daily rate (annual rate / 252).
    pub fn new(portfolio_equity: &[f64], benchmark_equity: Option<&[f64]>, risk_free_rate: f64) -> Self {
        let returns = returns::daily_returns(portfolio_equity);
        let benchmark_returns = benchmark_equity.map(returns::daily_returns);

        Self {
            portfolio: portfolio_equity.to_vec(),
            benchmark: benchmark_equity.map(|b| b.to_vec()),
            returns,
            benchmark_returns,
            risk_free_rate,
            var_alpha: DEFAULT_VAR_ALPHA,
        }
    }

    /// Create an analyzer from validated equity curves
    pub fn from_curves(
        portfolio: &EquityCurve,
        benchmark: Option<&EquityCurve>,
        risk_free_rate: f64,
    ) -> Self {
        let benchmark_values = benchmark.map(|b| b.values());
        Self::new(
            &portfolio.values(),
            benchmark_values.as_deref(),
            risk_free_rate,
        )
    }

    /// Override the VaR/CVaR quantile (default 0.05)
    pub fn with_var_alpha(mut self, alpha: f64) -> Self {
        self.var_alpha = alpha;
        self
    }

    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    pub fn benchmark_returns(&self) -> Option<&[f64]> {
        self.benchmark_returns.as_deref()
    }

    /// Mean daily return (0.0 for curves shorter than 2 samples)
    pub fn average_return(&self) -> f64 {
        stats::mean(&self.returns)
    }

    /// Cumulative return from first to last sample (0.0 for curves shorter
    /// than 2 samples)
    pub fn total_return(&self) -> f64 {
        if self.portfolio.len() < 2 {
            return 0.0;
        }
        self.portfolio[self.portfolio.len() - 1] / self.portfolio[0] - 1.0
    }

    /// Population standard deviation of daily returns
    pub fn std_dev(&self) -> f64 {
        stats::population_std(&self.returns)
    }

    /// Daily Sharpe ratio. NaN when the return standard deviation is zero.
    pub fn sharpe_ratio(&self) -> f64 {
        let sd = self.std_dev();
        if sd == 0.0 {
            return f64::NAN;
        }
        (self.average_return() - self.risk_free_rate) / sd
    }

    pub fn annualised_sharpe(&self) -> f64 {
        self.sharpe_ratio() * TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Standard deviation of the negative daily returns only
    pub fn downside_std(&self) -> f64 {
        stats::downside_std(&self.returns)
    }

    /// Sortino ratio. NaN when there are no negative returns.
    pub fn sortino_ratio(&self) -> f64 {
        let ds = self.downside_std();
        if ds == 0.0 {
            return f64::NAN;
        }
        (self.average_return() - self.risk_free_rate) / ds
    }

    pub fn annualised_sortino(&self) -> f64 {
        self.sortino_ratio() * TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Calmar ratio: annualised mean return over max drawdown. NaN when the
    /// curve never draws down.
    pub fn calmar_ratio(&self) -> f64 {
        let dd = self.max_drawdown();
        if dd == 0.0 {
            return f64::NAN;
        }
        self.average_return() * TRADING_DAYS_PER_YEAR / dd
    }

    pub fn drawdown_series(&self) -> Vec<f64> {
        returns::drawdown_series(&self.portfolio)
    }

    pub fn max_drawdown(&self) -> f64 {
        returns::max_drawdown(&self.portfolio)
    }

    pub fn average_drawdown(&self) -> f64 {
        returns::average_drawdown(&self.portfolio)
    }

    pub fn drawdown_duration(&self) -> usize {
        returns::drawdown_duration(&self.portfolio)
    }

    /// Return distribution statistics at the given VaR quantile
    pub fn distribution_stats(&self, alpha: f64) -> DistributionStats {
        DistributionStats {
            skewness: stats::skewness(&self.returns),
            kurtosis: stats::kurtosis(&self.returns),
            var: stats::value_at_risk(&self.returns, alpha),
            cvar: stats::conditional_value_at_risk(&self.returns, alpha),
        }
    }

    /// CAPM alpha/beta against the benchmark. Undefined (NaN, NaN) when no
    /// benchmark was supplied or the return series lengths differ.
    pub fn alpha_beta(&self) -> AlphaBeta {
        match &self.benchmark_returns {
            Some(bench) => regression::capm_regression(&self.returns, bench, self.risk_free_rate),
            None => AlphaBeta::undefined(),
        }
    }

    /// Rolling CAPM regression over sliding windows of `window` samples.
    /// Empty when no benchmark was supplied or the series is shorter than
    /// the window.
    pub fn rolling_alpha_beta(&self, window: usize) -> Vec<AlphaBeta> {
        match &self.benchmark_returns {
            Some(bench) => {
                regression::rolling_alpha_beta(&self.returns, bench, window, self.risk_free_rate)
            }
            None => Vec::new(),
        }
    }

    /// Rolling population standard deviation of daily returns
    pub fn rolling_volatility(&self, window: usize) -> Vec<f64> {
        if window == 0 || self.returns.len() < window {
            return Vec::new();
        }
        self.returns
            .windows(window)
            .map(stats::population_std)
            .collect()
    }

    /// Rolling daily Sharpe ratio; NaN entries where the window is flat
    pub fn rolling_sharpe(&self, window: usize) -> Vec<f64> {
        if window == 0 || self.returns.len() < window {
            return Vec::new();
        }
        self.returns
            .windows(window)
            .map(|w| {
                let sd = stats::population_std(w);
                if sd == 0.0 {
                    f64::NAN
                } else {
                    (stats::mean(w) - self.risk_free_rate) / sd
                }
            })
            .collect()
    }

    /// Aggregate every metric into a single report
    pub fn calculate_all(&self) -> PerformanceReport {
        let dist = self.distribution_stats(self.var_alpha);
        let ab = self.alpha_beta();

        PerformanceReport {
            average_return: self.average_return(),
            total_return: self.total_return(),
            std_dev: self.std_dev(),
            sharpe_ratio: self.sharpe_ratio(),
            annualised_sharpe: self.annualised_sharpe(),
            sortino_ratio: self.sortino_ratio(),
            annualised_sortino: self.annualised_sortino(),
            calmar_ratio: self.calmar_ratio(),
            max_drawdown: self.max_drawdown(),
            average_drawdown: self.average_drawdown(),
            drawdown_duration: self.drawdown_duration(),
            skewness: dist.skewness,
            kurtosis: dist.kurtosis,
            var: dist.var,
            cvar: dist.cvar,
            alpha: ab.alpha,
            beta: ab.beta,
        }
    }

    /// The benchmark's own report, for side-by-side comparison. Alpha and
    /// beta are 0 and 1 by definition (benchmark against itself). None when
    /// no benchmark was supplied.
    pub fn benchmark_report(&self) -> Option<PerformanceReport> {
        let bench = self.benchmark.as_ref()?;

        let analyzer = PerformanceAnalyzer::new(bench, None, self.risk_free_rate)
            .with_var_alpha(self.var_alpha);
        let mut report = analyzer.calculate_all();
        report.alpha = 0.0;
        report.beta = 1.0;

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DAILY_RF: f64 = 0.02 / TRADING_DAYS_PER_YEAR;

    fn analyzer_100_105_110() -> PerformanceAnalyzer {
        PerformanceAnalyzer::new(
            &[100.0, 105.0, 110.0],
            Some(&[200.0, 210.0, 220.0]),
            DAILY_RF,
        )
    }

    #[test]
    fn test_average_return() {
        let pm = analyzer_100_105_110();
        assert_relative_eq!(pm.average_return(), 0.048809523809523806, epsilon = 1e-12);
    }

    #[test]
    fn test_total_return() {
        let pm = analyzer_100_105_110();
        assert_relative_eq!(pm.total_return(), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_std_dev() {
        let pm = analyzer_100_105_110();
        let spread = 0.05 - (110.0 / 105.0 - 1.0);
        assert_relative_eq!(pm.std_dev(), spread / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sharpe_consistency() {
        let pm = analyzer_100_105_110();
        let expected = (pm.average_return() - DAILY_RF) / pm.std_dev();
        assert_relative_eq!(pm.sharpe_ratio(), expected, epsilon = 1e-12);
        assert_relative_eq!(
            pm.annualised_sharpe(),
            expected * TRADING_DAYS_PER_YEAR.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_curve_degenerate_metrics() {
        let pm = PerformanceAnalyzer::new(&[100.0; 5], None, DAILY_RF);
        assert_eq!(pm.std_dev(), 0.0);
        assert_eq!(pm.max_drawdown(), 0.0);
        assert!(pm.sharpe_ratio().is_nan());
        assert!(pm.sortino_ratio().is_nan());
        assert!(pm.calmar_ratio().is_nan());
    }

    #[test]
    fn test_single_point_curve_neutral_values() {
        let pm = PerformanceAnalyzer::new(&[100.0], None, DAILY_RF);
        assert_eq!(pm.average_return(), 0.0);
        assert_eq!(pm.total_return(), 0.0);
        assert_eq!(pm.std_dev(), 0.0);
        assert_eq!(pm.drawdown_duration(), 0);
    }

    #[test]
    fn test_sortino_with_no_losses_is_undefined() {
        let pm = PerformanceAnalyzer::new(&[100.0, 105.0, 110.0], None, DAILY_RF);
        assert_eq!(pm.downside_std(), 0.0);
        assert!(pm.sortino_ratio().is_nan());
    }

    #[test]
    fn test_sortino_with_losses() {
        // Returns: +10%, -5%, +2%, -1%
        let pm = PerformanceAnalyzer::new(
            &[100.0, 110.0, 104.5, 106.59, 105.5241],
            None,
            0.0,
        );
        assert_relative_eq!(pm.downside_std(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(pm.sortino_ratio(), 0.015 / 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_calmar_ratio() {
        let pm = PerformanceAnalyzer::new(&[100.0, 120.0, 80.0, 90.0], None, DAILY_RF);
        let expected = pm.average_return() * TRADING_DAYS_PER_YEAR / (1.0 / 3.0);
        assert_relative_eq!(pm.calmar_ratio(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_alpha_beta_against_self() {
        let values = [100.0, 102.0, 99.0, 104.0, 103.0, 108.0];
        let pm = PerformanceAnalyzer::new(&values, Some(&values), DAILY_RF);
        let ab = pm.alpha_beta();
        assert_relative_eq!(ab.beta, 1.0, epsilon = 1e-10);
        assert_relative_eq!(ab.alpha, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_alpha_beta_without_benchmark_is_undefined() {
        let pm = PerformanceAnalyzer::new(&[100.0, 105.0, 110.0], None, DAILY_RF);
        assert!(!pm.alpha_beta().is_defined());
        assert!(pm.rolling_alpha_beta(2).is_empty());
    }

    #[test]
    fn test_alpha_beta_shape_mismatch_is_undefined() {
        let pm = PerformanceAnalyzer::new(
            &[100.0, 105.0, 110.0, 108.0],
            Some(&[200.0, 210.0, 220.0]),
            DAILY_RF,
        );
        assert!(!pm.alpha_beta().is_defined());
    }

    #[test]
    fn test_benchmark_report_pins_alpha_beta() {
        let pm = analyzer_100_105_110();
        let report = pm.benchmark_report().unwrap();
        assert_eq!(report.alpha, 0.0);
        assert_eq!(report.beta, 1.0);
        assert_relative_eq!(report.total_return, 0.10, epsilon = 1e-12);

        let no_bench = PerformanceAnalyzer::new(&[100.0, 105.0], None, DAILY_RF);
        assert!(no_bench.benchmark_report().is_none());
    }

    #[test]
    fn test_rolling_diagnostics_lengths() {
        let values: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64) + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let pm = PerformanceAnalyzer::new(&values, None, DAILY_RF);

        assert_eq!(pm.rolling_volatility(10).len(), values.len() - 1 - 10 + 1);
        assert_eq!(pm.rolling_sharpe(10).len(), values.len() - 1 - 10 + 1);
        assert!(pm.rolling_volatility(100).is_empty());
        assert!(pm.rolling_sharpe(0).is_empty());
    }

    #[test]
    fn test_calculate_all_is_consistent_with_methods() {
        let pm = analyzer_100_105_110();
        let report = pm.calculate_all();

        assert_relative_eq!(report.average_return, pm.average_return(), epsilon = 1e-15);
        assert_relative_eq!(report.total_return, pm.total_return(), epsilon = 1e-15);
        assert_relative_eq!(report.max_drawdown, pm.max_drawdown(), epsilon = 1e-15);
        assert_eq!(report.drawdown_duration, pm.drawdown_duration());
        let ab = pm.alpha_beta();
        assert_relative_eq!(report.beta, ab.beta, epsilon = 1e-15);
    }
}
