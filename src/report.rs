//! Comparison report rendering
//!
//! Formats strategy and benchmark metrics into a side-by-side table.
//! Purely presentational: return/drawdown/VaR/CVaR/alpha rows are rendered
//! as percentages, drawdown duration as an integer, everything else with
//! two decimals. Non-finite values render as `N/A`.

use crate::types::PerformanceReport;

const SPAN: usize = 54;
const LABEL_WIDTH: usize = 25;
const VALUE_WIDTH: usize = 12;

/// How a metric row is formatted
#[derive(Debug, Clone, Copy)]
enum Format {
    Percent,
    TwoDecimals,
    Integer,
}

type Accessor = fn(&PerformanceReport) -> f64;

/// Row accessors for the fixed report layout
fn rows(var_alpha: f64) -> Vec<(String, Accessor, Format)> {
    let var_pct = var_alpha * 100.0;
    vec![
        ("Sharpe Ratio:".to_string(), |r| r.sharpe_ratio, Format::TwoDecimals),
        ("Sortino Ratio:".to_string(), |r| r.sortino_ratio, Format::TwoDecimals),
        ("Cumulative Return:".to_string(), |r| r.total_return, Format::Percent),
        ("Max Drawdown:".to_string(), |r| r.max_drawdown, Format::Percent),
        ("Average Drawdown:".to_string(), |r| r.average_drawdown, Format::Percent),
        ("Drawdown Duration:".to_string(), |r| r.drawdown_duration as f64, Format::Integer),
        ("Skewness:".to_string(), |r| r.skewness, Format::TwoDecimals),
        ("Kurtosis:".to_string(), |r| r.kurtosis, Format::TwoDecimals),
        (format!("VaR {:.0}%:", var_pct), |r| r.var, Format::Percent),
        (format!("CVaR {:.0}%:", var_pct), |r| r.cvar, Format::Percent),
        ("Calmar Ratio:".to_string(), |r| r.calmar_ratio, Format::TwoDecimals),
        ("Alpha:".to_string(), |r| r.alpha, Format::Percent),
        ("Beta:".to_string(), |r| r.beta, Format::TwoDecimals),
    ]
}

fn format_value(value: f64, format: Format) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    match format {
        Format::Percent => format!("{:.2}%", value * 100.0),
        Format::TwoDecimals => format!("{:.2}", value),
        Format::Integer => format!("{}", value as i64),
    }
}

fn centered_title(title: &str) -> String {
    let pad = SPAN.saturating_sub(title.len()) / 2;
    format!("{}{}", " ".repeat(pad), title)
}

/// Render the strategy-vs-benchmark comparison table. With no benchmark
/// report, a single-column strategy table is rendered instead.
pub fn render_comparison(
    strategy: &PerformanceReport,
    benchmark: Option<&PerformanceReport>,
    var_alpha: f64,
) -> String {
    let title = if benchmark.is_some() {
        "Strategy vs Benchmark Performance Comparison"
    } else {
        "Strategy Performance"
    };

    let mut out = String::new();
    out.push_str(&"=".repeat(SPAN));
    out.push('\n');
    out.push_str(&centered_title(title));
    out.push('\n');
    out.push_str(&"=".repeat(SPAN));
    out.push('\n');

    out.push_str(&header_line(benchmark.is_some()));
    out.push_str(&"-".repeat(SPAN));
    out.push('\n');

    for (label, accessor, format) in rows(var_alpha) {
        let strat = format_value(accessor(strategy), format);
        match benchmark {
            Some(bench) => {
                let bench_val = format_value(accessor(bench), format);
                out.push_str(&format!(
                    "{label:<lw$} {strat:>vw$} {bench_val:>vw$}\n",
                    lw = LABEL_WIDTH,
                    vw = VALUE_WIDTH
                ));
            }
            None => {
                out.push_str(&format!(
                    "{label:<lw$} {strat:>vw$}\n",
                    lw = LABEL_WIDTH,
                    vw = VALUE_WIDTH
                ));
            }
        }
    }

    out.push_str(&"=".repeat(SPAN));
    out.push('\n');
    out
}

fn header_line(with_benchmark: bool) -> String {
    if with_benchmark {
        format!(
            "{:<lw$} {:>vw$} {:>vw$}\n",
            "",
            "Strategy",
            "Benchmark",
            lw = LABEL_WIDTH,
            vw = VALUE_WIDTH
        )
    } else {
        format!(
            "{:<lw$} {:>vw$}\n",
            "",
            "Strategy",
            lw = LABEL_WIDTH,
            vw = VALUE_WIDTH
        )
    }
}
