//! Stats module - Summary metrics and descriptive statistics

mod calculator;

pub use calculator::{ColumnProfile, StatsCalculator, SummaryMetrics};
