//! DM Dashboard - Regional diabetes case-count reporting
//!
//! Loads the case-count CSV, computes summary statistics, renders three
//! static charts and serves a single dashboard page.

mod charts;
mod config;
mod data;
mod pipeline;
mod stats;
mod web;

#[cfg(test)]
mod testutil;

use config::{DashboardConfig, CONFIG_FILE};
use pipeline::DashboardError;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))?;

    // Nothing is served unless every stage succeeded.
    let context = pipeline::bootstrap(&config).map_err(|e| {
        let err = startup_error(e);
        log::error!("{:#}", err);
        err
    })?;

    web::serve(config.bind_addr, Arc::new(context)).await
}

fn startup_error(err: DashboardError) -> anyhow::Error {
    anyhow::Error::new(err).context("dashboard startup failed")
}
