//! Portfolio analytics - main entry point
//!
//! This binary provides three subcommands:
//! - report: Compute and print the strategy vs benchmark comparison report
//! - rolling: Export rolling alpha/beta (and volatility/Sharpe) series
//! - monthly: Print the monthly returns matrix

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "portfolio-analytics")]
#[command(about = "Portfolio performance analytics: returns, risk ratios, drawdowns, and CAPM regression", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute performance metrics and print the comparison report
    Report {
        /// Path to the portfolio equity CSV (date,equity)
        #[arg(short, long)]
        equity: String,

        /// Path to the benchmark equity CSV (date,equity)
        #[arg(short, long)]
        benchmark: Option<String>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Annual risk-free rate (overrides config file)
        #[arg(long)]
        risk_free_rate: Option<f64>,

        /// VaR/CVaR quantile (overrides config file)
        #[arg(long)]
        var_alpha: Option<f64>,

        /// Write the report(s) as JSON to this path
        #[arg(long)]
        json: Option<String>,
    },

    /// Export rolling alpha/beta regression series to CSV
    Rolling {
        /// Path to the portfolio equity CSV (date,equity)
        #[arg(short, long)]
        equity: String,

        /// Path to the benchmark equity CSV (date,equity)
        #[arg(short, long)]
        benchmark: String,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Rolling window in samples (overrides config file)
        #[arg(short, long)]
        window: Option<usize>,

        /// Output CSV path (defaults to <results_dir>/rolling_alpha_beta.csv)
        #[arg(short, long)]
        output: Option<String>,

        /// Also export rolling volatility and Sharpe diagnostics
        #[arg(long)]
        diagnostics: bool,
    },

    /// Print the monthly returns matrix
    Monthly {
        /// Path to the portfolio equity CSV (date,equity)
        #[arg(short, long)]
        equity: String,
    },
}

fn setup_logging(verbose: bool, command_name: &str) -> Result<()> {
    // Create logs directory
    std::fs::create_dir_all("logs")?;

    // Create log file with naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from("logs").join(&log_filename);

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // File appender
    let file_appender = tracing_appender::rolling::never("logs", &log_filename);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    // File layer - same format but without ANSI colors
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized");
    info!("Log file: {}", log_path.display());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Report { .. } => "report",
        Commands::Rolling { .. } => "rolling",
        Commands::Monthly { .. } => "monthly",
    };

    setup_logging(cli.verbose, command_name)?;

    match cli.command {
        Commands::Report {
            equity,
            benchmark,
            config,
            risk_free_rate,
            var_alpha,
            json,
        } => commands::report::run(equity, benchmark, config, risk_free_rate, var_alpha, json),

        Commands::Rolling {
            equity,
            benchmark,
            config,
            window,
            output,
            diagnostics,
        } => commands::rolling::run(equity, benchmark, config, window, output, diagnostics),

        Commands::Monthly { equity } => commands::monthly::run(equity),
    }
}
