// src/pipeline.rs

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::visualize::{
    chart::{MUNICIPALITY_CHART_TITLE, NETWORK_MEAN_CHART_TITLE},
    municipality_view, network_means, render_municipality_chart, render_network_mean_chart,
    write_chart_document, MUNICIPALITY_CHART_FILE, NETWORK_MEAN_CHART_FILE,
};
use crate::{extract, transform};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// What one run read, produced and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub raw_rows: usize,
    pub long_rows: usize,
    pub municipality_rows: usize,
    pub network_groups: usize,
    pub municipality_chart: PathBuf,
    pub network_mean_chart: PathBuf,
}

/// Extract → transform → visualize, once.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let start = Instant::now();

    // ─── 1) extract ──────────────────────────────────────────────────
    info!(path = %config.data_path.display(), "1. loading source spreadsheet");
    let raw = extract::load_workbook(&config.data_path, config.skip_rows)?;

    // ─── 2) transform ────────────────────────────────────────────────
    info!("2. cleaning and reshaping the table");
    let long = transform::transform(
        &raw,
        &config.columns,
        &config.years,
        config.strict_columns,
    )?;

    // ─── 3) visualize + export ───────────────────────────────────────
    info!("3.1. chart 1: approval rate per municipality (public network)");
    let by_municipality = municipality_view(&long, &config.municipalities)?;
    let municipality_chart = write_chart_document(
        &render_municipality_chart(&by_municipality, &config.years),
        MUNICIPALITY_CHART_TITLE,
        &config.output_dir.join(MUNICIPALITY_CHART_FILE),
    )?;

    info!("3.2. chart 2: mean approval rate per network");
    let means = network_means(&long, &config.municipalities)?;
    let network_mean_chart = write_chart_document(
        &render_network_mean_chart(&means, &config.years),
        NETWORK_MEAN_CHART_TITLE,
        &config.output_dir.join(NETWORK_MEAN_CHART_FILE),
    )?;

    let summary = RunSummary {
        raw_rows: raw.rows.len(),
        long_rows: long.num_rows(),
        municipality_rows: by_municipality.num_rows(),
        network_groups: means.len(),
        municipality_chart,
        network_mean_chart,
    };
    info!(elapsed = ?start.elapsed(), ?summary, "pipeline finished");
    Ok(summary)
}
