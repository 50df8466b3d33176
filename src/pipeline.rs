//! Startup pipeline: load → summarize/categorize → render charts.
//!
//! Runs once before the server starts and yields an immutable
//! [`DashboardContext`] that request handlers share read-only.

use crate::charts::{
    ChartBackend, ChartInputs, ChartSet, PlottersBackend, RenderError, StaticChartRenderer,
};
use crate::config::DashboardConfig;
use crate::data::{categorize, DataLoader, DataProcessor, LoadError, RecordMap, SchemaError};
use crate::stats::{StatsCalculator, SummaryMetrics};
use crate::web::render_stats_table;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Everything the page needs, computed once.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub columns: Vec<String>,
    pub records: Vec<RecordMap>,
    pub summary: SummaryMetrics,
    /// Descriptive statistics as an HTML table.
    pub stats_table: String,
    pub charts: ChartSet,
}

/// Build the context with the plotters chart backend.
pub fn bootstrap(config: &DashboardConfig) -> Result<DashboardContext, DashboardError> {
    bootstrap_with(config, &PlottersBackend)
}

pub fn bootstrap_with<B: ChartBackend>(
    config: &DashboardConfig,
    backend: &B,
) -> Result<DashboardContext, DashboardError> {
    let dataset = DataLoader::load_csv(&config.data_path)?;

    let summary = StatsCalculator::summarize(&dataset, &config.columns)?;
    let regional = DataProcessor::region_records(&dataset, &config.columns)?;

    let year_records = DataProcessor::filter_year(&regional, config.reference_year);
    let ranked = DataProcessor::top_n(&year_records, config.top_n);
    let snapshot = categorize(&regional, config.reference_year);
    let yearly_totals = DataProcessor::yearly_totals(&dataset, &config.columns)?;
    log::info!(
        "Reference year {}: {} records, tally {:?}",
        snapshot.year,
        snapshot.records.len(),
        snapshot.tally.non_empty()
    );
    for labeled in &snapshot.records {
        log::debug!(
            "{} {}: {} cases, {}",
            snapshot.year,
            labeled.record.region,
            labeled.record.cases,
            labeled.category
        );
    }

    let charts = StaticChartRenderer::new(backend, &config.static_dir).render_all(&ChartInputs {
        year: config.reference_year,
        top_n: config.top_n,
        ranked: &ranked,
        yearly_totals: &yearly_totals,
        tally: &snapshot.tally,
    })?;
    if !charts.placeholders.is_empty() {
        log::warn!(
            "Started with placeholder charts: {:?} (reference year {})",
            charts.placeholders,
            config.reference_year
        );
    }

    Ok(DashboardContext {
        columns: dataset.columns().to_vec(),
        records: dataset.records(),
        stats_table: render_stats_table(&summary.profiles),
        summary,
        charts,
    })
}
