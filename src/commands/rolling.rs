//! Rolling command implementation

use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use portfolio_analytics::{data, Config, PerformanceAnalyzer};

pub fn run(
    equity_path: String,
    benchmark_path: String,
    config_path: Option<String>,
    window_override: Option<usize>,
    output: Option<String>,
    diagnostics: bool,
) -> Result<()> {
    info!("Starting rolling analysis");

    let mut config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(window) = window_override {
        info!("Overriding rolling window to: {}", window);
        config.analytics.rolling_window = window;
    }

    let portfolio = data::load_equity_csv(&equity_path)?;
    let benchmark = data::load_equity_csv(&benchmark_path)?;
    let (portfolio, benchmark) = data::align_curves(&portfolio, &benchmark);

    let analyzer = PerformanceAnalyzer::from_curves(
        &portfolio,
        Some(&benchmark),
        config.analytics.daily_risk_free_rate(),
    );

    let window = config.analytics.rolling_window;
    let rolling = analyzer.rolling_alpha_beta(window);

    if rolling.is_empty() {
        warn!(
            "Not enough data for a {}-sample rolling window ({} returns available)",
            window,
            analyzer.returns().len()
        );
        return Ok(());
    }

    // Window i spans return indices i..i+window, ending at equity index i+window
    let timestamps = portfolio.timestamps();
    let dates: Vec<_> = timestamps[window..].to_vec();

    let out_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.report.results_dir).join("rolling_alpha_beta.csv"));
    data::save_rolling_csv(&dates, &rolling, &out_path)?;

    if diagnostics {
        let vol_window = config.analytics.volatility_window;
        let volatility = analyzer.rolling_volatility(vol_window);
        let sharpe = analyzer.rolling_sharpe(vol_window);

        if volatility.is_empty() {
            warn!(
                "Not enough data for a {}-sample diagnostics window",
                vol_window
            );
        } else {
            let diag_dates: Vec<_> = timestamps[vol_window..].to_vec();
            let diag_path = out_path
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."))
                .join("rolling_diagnostics.csv");
            data::save_diagnostics_csv(&diag_dates, &volatility, &sharpe, diag_path)?;
        }
    }

    info!("Rolling analysis completed successfully");

    Ok(())
}
