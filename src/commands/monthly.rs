//! Monthly command implementation

use anyhow::Result;
use portfolio_analytics::{data, monthly::MonthlyReturns};
use tracing::info;

pub fn run(equity_path: String) -> Result<()> {
    info!("Starting monthly returns analysis");

    let curve = data::load_equity_csv(&equity_path)?;
    let monthly = MonthlyReturns::from_curve(&curve);

    println!("{}", monthly.render());

    info!("Monthly returns analysis completed successfully");

    Ok(())
}
