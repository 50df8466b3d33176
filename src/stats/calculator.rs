//! Statistics Calculator Module
//! Dataset-wide summary metrics and per-column descriptive statistics.

use crate::config::ColumnNames;
use crate::data::{Dataset, SchemaError};
use rayon::prelude::*;
use statrs::statistics::Statistics;
use std::collections::{BTreeSet, HashSet};

/// Descriptive statistics for one numeric column, each rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnProfile {
    /// Statistic names in `describe()` order.
    pub const ROW_LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values matching [`Self::ROW_LABELS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Read-only summary of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub total_rows: usize,
    pub total_cols: usize,
    pub total_regions: usize,
    pub years: Vec<i64>,
    pub profiles: Vec<ColumnProfile>,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute every summary metric the dashboard shows.
    pub fn summarize(
        dataset: &Dataset,
        columns: &ColumnNames,
    ) -> Result<SummaryMetrics, SchemaError> {
        let summary = SummaryMetrics {
            total_rows: dataset.row_count(),
            total_cols: dataset.column_count(),
            total_regions: Self::distinct(dataset, &columns.region)?,
            years: Self::distinct_sorted(dataset, &columns.year)?,
            profiles: Self::describe(dataset)?,
        };
        log::info!(
            "Summary: {} rows, {} regions, years {:?}, {} numeric columns profiled",
            summary.total_rows,
            summary.total_regions,
            summary.years,
            summary.profiles.len()
        );
        Ok(summary)
    }

    /// Number of unique non-missing values in `column`.
    pub fn distinct(dataset: &Dataset, column: &str) -> Result<usize, SchemaError> {
        let values = dataset.string_values(column)?;
        let unique: HashSet<String> = values.into_iter().flatten().collect();
        Ok(unique.len())
    }

    /// Unique non-missing values of an integer column, ascending.
    pub fn distinct_sorted(dataset: &Dataset, column: &str) -> Result<Vec<i64>, SchemaError> {
        let values = dataset.i64_values(column)?;
        let unique: BTreeSet<i64> = values.into_iter().flatten().collect();
        Ok(unique.into_iter().collect())
    }

    /// Profile every numeric column in declaration order.
    pub fn describe(dataset: &Dataset) -> Result<Vec<ColumnProfile>, SchemaError> {
        dataset
            .numeric_columns()
            .par_iter()
            .map(|name| -> Result<ColumnProfile, SchemaError> {
                let values: Vec<f64> = dataset
                    .f64_values(name)?
                    .into_iter()
                    .flatten()
                    .filter(|v| !v.is_nan())
                    .collect();
                Ok(Self::profile(name, &values))
            })
            .collect()
    }

    /// Compute descriptive statistics for an array of values.
    pub fn profile(column: &str, values: &[f64]) -> ColumnProfile {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let (min, max) = match (sorted.first(), sorted.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (f64::NAN, f64::NAN),
        };

        ColumnProfile {
            column: column.to_string(),
            count: values.len(),
            mean: round2(values.iter().mean()),
            // Sample standard deviation (N - 1); NaN below two values.
            std: round2(values.iter().std_dev()),
            min: round2(min),
            q25: round2(Self::percentile(&sorted, 25.0)),
            median: round2(Self::percentile(&sorted, 50.0)),
            q75: round2(Self::percentile(&sorted, 75.0)),
            max: round2(max),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

fn round2(v: f64) -> f64 {
    if v.is_finite() {
        (v * 100.0).round() / 100.0
    } else {
        v
    }
}
