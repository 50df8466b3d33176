//! Data Processor Module
//! Extracts region/year/case records and derives the ranking and trend series.

use super::{Dataset, SchemaError};
use crate::config::ColumnNames;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// The three fields the charts are built from, for one dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    pub region: String,
    pub year: i64,
    pub cases: i64,
}

impl RegionRecord {
    pub fn new(region: impl Into<String>, year: i64, cases: i64) -> Self {
        Self {
            region: region.into(),
            year,
            cases,
        }
    }
}

/// Handles row extraction and the aggregations behind the bar and line charts.
pub struct DataProcessor;

impl DataProcessor {
    /// Build region records in input order, skipping rows with a missing field.
    pub fn region_records(
        dataset: &Dataset,
        columns: &ColumnNames,
    ) -> Result<Vec<RegionRecord>, SchemaError> {
        let regions = dataset.string_values(&columns.region)?;
        let years = dataset.i64_values(&columns.year)?;
        let cases = dataset.i64_values(&columns.cases)?;

        let records: Vec<RegionRecord> = regions
            .into_iter()
            .zip(years)
            .zip(cases)
            .filter_map(|((region, year), cases)| {
                Some(RegionRecord::new(region?, year?, cases?))
            })
            .collect();

        let skipped = dataset.row_count() - records.len();
        if skipped > 0 {
            log::warn!("Skipped {} rows with a missing region, year or case count", skipped);
        }
        Ok(records)
    }

    /// Records whose year equals `year`, in input order.
    pub fn filter_year(records: &[RegionRecord], year: i64) -> Vec<RegionRecord> {
        records.iter().filter(|r| r.year == year).cloned().collect()
    }

    /// Highest `n` records by case count; equal counts keep input order.
    pub fn top_n(records: &[RegionRecord], n: usize) -> Vec<RegionRecord> {
        let mut ranked: Vec<(usize, &RegionRecord)> = records.iter().enumerate().collect();
        ranked.sort_by_key(|(pos, r)| (Reverse(r.cases), *pos));
        ranked.into_iter().take(n).map(|(_, r)| r.clone()).collect()
    }

    /// Total case count per year, ascending by year.
    ///
    /// Reads only the year and case columns: the region plays no part here.
    /// Rows without a year are left out; a missing case count adds 0.
    pub fn yearly_totals(
        dataset: &Dataset,
        columns: &ColumnNames,
    ) -> Result<Vec<(i64, i64)>, SchemaError> {
        let years = dataset.i64_values(&columns.year)?;
        let cases = dataset.i64_values(&columns.cases)?;

        let mut totals: BTreeMap<i64, i64> = BTreeMap::new();
        for (year, cases) in years.into_iter().zip(cases) {
            if let Some(year) = year {
                *totals.entry(year).or_insert(0) += cases.unwrap_or(0);
            }
        }
        Ok(totals.into_iter().collect())
    }
}
