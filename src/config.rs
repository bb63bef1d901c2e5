//! Configuration management
//!
//! Handles loading and parsing of JSON configuration files. Every section
//! has defaults so a missing or partial file still yields a usable setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analyzer::{DEFAULT_VAR_ALPHA, TRADING_DAYS_PER_YEAR};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        Ok(config)
    }
}

/// Analytics parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate; divided by 252 for daily computations
    pub risk_free_rate: f64,
    /// Quantile for VaR/CVaR
    pub var_alpha: f64,
    /// Window for rolling alpha/beta regression, in samples
    pub rolling_window: usize,
    /// Window for rolling volatility/Sharpe diagnostics, in samples
    pub volatility_window: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            risk_free_rate: 0.02,
            var_alpha: DEFAULT_VAR_ALPHA,
            rolling_window: 252,
            volatility_window: 63,
        }
    }
}

impl AnalyticsConfig {
    /// Daily risk-free rate derived from the annual rate
    pub fn daily_risk_free_rate(&self) -> f64 {
        self.risk_free_rate / TRADING_DAYS_PER_YEAR
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub results_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            results_dir: "results".to_string(),
        }
    }
}
