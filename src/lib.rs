//! Portfolio Performance Analytics
//!
//! A pure, stateless analytics engine for portfolio equity curves:
//! returns, risk-adjusted ratios, drawdown statistics, return-distribution
//! statistics, and CAPM alpha/beta against a benchmark, plus side-by-side
//! report rendering and monthly return matrices.

pub mod analyzer;
pub mod config;
pub mod data;
pub mod monthly;
pub mod regression;
pub mod report;
pub mod returns;
pub mod stats;
pub mod types;

pub use analyzer::PerformanceAnalyzer;
pub use config::Config;
pub use types::*;
