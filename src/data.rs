//! Data loading and export
//!
//! Loads equity curves from CSV files, aligns portfolio and benchmark
//! curves on their common timestamps, and writes report/rolling output.
//! All file I/O lives here; the analytics types never touch the filesystem.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::regression::AlphaBeta;
use crate::types::{EquityCurve, EquityPoint, PerformanceReport};

/// Parse a timestamp in any of the accepted formats:
/// RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare `YYYY-MM-DD` date.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    s.parse::<DateTime<Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|nd| {
                DateTime::<Utc>::from_naive_utc_and_offset(nd.and_time(chrono::NaiveTime::MIN), Utc)
            })
        })
        .context(format!("Failed to parse datetime: {}", s))
}

/// Load an equity curve from a CSV file with `date,equity` rows
/// (a header row is expected and skipped).
pub fn load_equity_csv(path: impl AsRef<Path>) -> Result<EquityCurve> {
    let mut reader = csv::Reader::from_path(path.as_ref()).context("Failed to open CSV file")?;

    let mut points = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.context(format!("Failed to read row {}", row_idx + 1))?;

        let dt_str = record.get(0).context("Missing date column")?;
        let datetime = parse_datetime(dt_str.trim())?;

        let value: f64 = record
            .get(1)
            .context("Missing equity column")?
            .trim()
            .parse()
            .context(format!("Failed to parse equity value in row {}", row_idx + 1))?;

        points.push(EquityPoint::new(datetime, value));
    }

    let curve = EquityCurve::new(points)
        .context(format!("Invalid equity curve in {}", path.as_ref().display()))?;

    info!(
        "Loaded {} equity points from {}",
        curve.len(),
        path.as_ref().display()
    );
    Ok(curve)
}

/// Restrict two curves to their common timestamps, preserving time order.
/// Regression needs equal-length, same-dated series; points present in only
/// one curve are dropped with a warning.
pub fn align_curves(portfolio: &EquityCurve, benchmark: &EquityCurve) -> (EquityCurve, EquityCurve) {
    let portfolio_times: HashSet<DateTime<Utc>> = portfolio.timestamps().into_iter().collect();
    let benchmark_times: HashSet<DateTime<Utc>> = benchmark.timestamps().into_iter().collect();

    let keep = |curve: &EquityCurve, other: &HashSet<DateTime<Utc>>| {
        let points: Vec<EquityPoint> = curve
            .points()
            .iter()
            .filter(|p| other.contains(&p.datetime))
            .copied()
            .collect();
        // Subsequence of a valid curve is still valid
        EquityCurve::new_unchecked(points)
    };

    let aligned_portfolio = keep(portfolio, &benchmark_times);
    let aligned_benchmark = keep(benchmark, &portfolio_times);

    let dropped =
        (portfolio.len() - aligned_portfolio.len()) + (benchmark.len() - aligned_benchmark.len());
    if dropped > 0 {
        warn!(
            "Dropped {} points with no matching timestamp in the other curve",
            dropped
        );
    }

    (aligned_portfolio, aligned_benchmark)
}

/// Write strategy (and optional benchmark) reports as a JSON document
pub fn save_reports_json(
    strategy: &PerformanceReport,
    benchmark: Option<&PerformanceReport>,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let doc = serde_json::json!({
        "strategy": strategy,
        "benchmark": benchmark,
    });

    let file = File::create(&path).context("Failed to create report file")?;
    serde_json::to_writer_pretty(file, &doc).context("Failed to write report JSON")?;

    info!("Saved report to {}", path.display());
    Ok(path)
}

/// Write a rolling alpha/beta series to CSV, one row per window end date
pub fn save_rolling_csv(
    dates: &[DateTime<Utc>],
    series: &[AlphaBeta],
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let mut file = File::create(&path).context("Failed to create output file")?;
    writeln!(file, "date,alpha,beta")?;

    for (date, fit) in dates.iter().zip(series) {
        writeln!(
            file,
            "{},{},{}",
            date.format("%Y-%m-%d"),
            fit.alpha,
            fit.beta
        )?;
    }

    info!("Saved {} rows to {}", series.len(), path.display());
    Ok(path)
}

/// Write rolling volatility and Sharpe series to CSV
pub fn save_diagnostics_csv(
    dates: &[DateTime<Utc>],
    volatility: &[f64],
    sharpe: &[f64],
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let mut file = File::create(&path).context("Failed to create output file")?;
    writeln!(file, "date,volatility,sharpe")?;

    for ((date, vol), sh) in dates.iter().zip(volatility).zip(sharpe) {
        writeln!(file, "{},{},{}", date.format("%Y-%m-%d"), vol, sh)?;
    }

    info!("Saved {} rows to {}", volatility.len(), path.display());
    Ok(path)
}
