//! Report command implementation

use anyhow::Result;
use portfolio_analytics::{data, report, Config, PerformanceAnalyzer};
use tracing::info;

pub fn run(
    equity_path: String,
    benchmark_path: Option<String>,
    config_path: Option<String>,
    risk_free_override: Option<f64>,
    var_alpha_override: Option<f64>,
    json_out: Option<String>,
) -> Result<()> {
    info!("Starting report");

    let mut config = match &config_path {
        Some(path) => {
            let config = Config::from_file(path)?;
            info!("Loaded configuration from: {}", path);
            config
        }
        None => Config::default(),
    };

    if let Some(rate) = risk_free_override {
        info!("Overriding risk-free rate to: {}", rate);
        config.analytics.risk_free_rate = rate;
    }

    if let Some(alpha) = var_alpha_override {
        info!("Overriding VaR alpha to: {}", alpha);
        config.analytics.var_alpha = alpha;
    }

    let portfolio = data::load_equity_csv(&equity_path)?;

    let (portfolio, benchmark) = match &benchmark_path {
        Some(path) => {
            let benchmark = data::load_equity_csv(path)?;
            let (portfolio, benchmark) = data::align_curves(&portfolio, &benchmark);
            (portfolio, Some(benchmark))
        }
        None => (portfolio, None),
    };

    let analyzer = PerformanceAnalyzer::from_curves(
        &portfolio,
        benchmark.as_ref(),
        config.analytics.daily_risk_free_rate(),
    )
    .with_var_alpha(config.analytics.var_alpha);

    let strategy_report = analyzer.calculate_all();
    let benchmark_report = analyzer.benchmark_report();

    println!(
        "{}",
        report::render_comparison(
            &strategy_report,
            benchmark_report.as_ref(),
            config.analytics.var_alpha
        )
    );

    if let Some(path) = json_out {
        data::save_reports_json(&strategy_report, benchmark_report.as_ref(), path)?;
    }

    info!("Report completed successfully");

    Ok(())
}
