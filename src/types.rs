//! Core data types used across the analytics engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for equity curve data
#[derive(Debug, Error)]
pub enum CurveValidationError {
    #[error("equity value ({value}) at index {index} must be positive")]
    NonPositiveValue { index: usize, value: f64 },

    #[error("equity value at index {index} is not finite")]
    NonFiniteValue { index: usize },

    #[error("timestamp at index {index} must be strictly after the previous point")]
    NonIncreasingTimestamp { index: usize },
}

/// A single observation of total account value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub datetime: DateTime<Utc>,
    pub value: f64,
}

impl EquityPoint {
    pub fn new(datetime: DateTime<Utc>, value: f64) -> Self {
        Self { datetime, value }
    }
}

/// Time-ordered equity curve: one positive value per trading day,
/// strictly increasing timestamps. The analytics engine only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquityCurve {
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// Create a new curve with validation
    pub fn new(points: Vec<EquityPoint>) -> Result<Self, CurveValidationError> {
        let curve = Self { points };
        curve.validate()?;
        Ok(curve)
    }

    /// Create a curve without validation (for trusted sources or when validation is done separately)
    pub fn new_unchecked(points: Vec<EquityPoint>) -> Self {
        Self { points }
    }

    /// Validate the curve data
    pub fn validate(&self) -> Result<(), CurveValidationError> {
        for (i, point) in self.points.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(CurveValidationError::NonFiniteValue { index: i });
            }
            if point.value <= 0.0 {
                return Err(CurveValidationError::NonPositiveValue {
                    index: i,
                    value: point.value,
                });
            }
            if i > 0 && point.datetime <= self.points[i - 1].datetime {
                return Err(CurveValidationError::NonIncreasingTimestamp { index: i });
            }
        }

        Ok(())
    }

    /// Check if the curve is valid without returning detailed error
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    /// Equity values in time order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Timestamps in time order
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.datetime).collect()
    }
}

/// Flat mapping of named performance metrics to scalar values.
/// Created fresh on each computation call; immutable once produced.
///
/// Degenerate statistics (zero standard deviation, zero drawdown, benchmark
/// shape mismatch) are represented as NaN, never as ±infinity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub average_return: f64,
    pub total_return: f64,
    pub std_dev: f64,
    pub sharpe_ratio: f64,
    pub annualised_sharpe: f64,
    pub sortino_ratio: f64,
    pub annualised_sortino: f64,
    pub calmar_ratio: f64,
    pub max_drawdown: f64,
    pub average_drawdown: f64,
    /// Longest contiguous run of samples spent below a prior peak
    pub drawdown_duration: usize,
    pub skewness: f64,
    pub kurtosis: f64,
    pub var: f64,
    pub cvar: f64,
    pub alpha: f64,
    pub beta: f64,
}
