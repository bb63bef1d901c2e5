//! Monthly returns analysis and matrix rendering
//!
//! Compounds daily returns into calendar-month returns and renders a
//! year-by-month matrix table with yearly totals.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::returns;
use crate::types::EquityCurve;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Year-Month key for organizing data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Calendar-month compounded returns keyed by (year, month)
pub struct MonthlyReturns {
    data: BTreeMap<YearMonth, f64>,
}

impl MonthlyReturns {
    /// Compound the curve's daily returns into monthly returns. Each daily
    /// return is attributed to the month of the day it was realized on.
    pub fn from_curve(curve: &EquityCurve) -> Self {
        let values = curve.values();
        let daily = returns::daily_returns(&values);
        let mut data: BTreeMap<YearMonth, f64> = BTreeMap::new();

        for (r, point) in daily.iter().zip(curve.points().iter().skip(1)) {
            let key = YearMonth {
                year: point.datetime.year(),
                month: point.datetime.month(),
            };
            let growth = data.entry(key).or_insert(1.0);
            *growth *= 1.0 + r;
        }

        for growth in data.values_mut() {
            *growth -= 1.0;
        }

        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return for a specific year and month, if any data fell in it
    pub fn get(&self, year: i32, month: u32) -> Option<f64> {
        self.data.get(&YearMonth { year, month }).copied()
    }

    fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.data.keys().map(|ym| ym.year).collect();
        years.dedup();
        years
    }

    /// Compounded return across all months of a year
    pub fn yearly_total(&self, year: i32) -> f64 {
        self.data
            .iter()
            .filter(|(ym, _)| ym.year == year)
            .map(|(_, r)| 1.0 + r)
            .product::<f64>()
            - 1.0
    }

    /// Render the monthly returns matrix as a formatted string.
    /// Missing months are shown as `-`.
    pub fn render(&self) -> String {
        if self.data.is_empty() {
            return "No data to display monthly returns matrix.".to_string();
        }

        let mut out = String::new();
        out.push_str(&format!("{:>6}", "Year"));
        for name in MONTH_NAMES {
            out.push_str(&format!("{:>9}", name));
        }
        out.push_str(&format!("{:>10}\n", "Total"));

        for year in self.years() {
            out.push_str(&format!("{:>6}", year));
            for month in 1..=12 {
                match self.get(year, month) {
                    Some(r) => out.push_str(&format!("{:>8.2}%", r * 100.0)),
                    None => out.push_str(&format!("{:>9}", "-")),
                }
            }
            out.push_str(&format!("{:>9.2}%\n", self.yearly_total(year) * 100.0));
        }

        out
    }
}
