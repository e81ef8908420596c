use anyhow::Result;
use ideb_approval::{pipeline, PipelineConfig, PipelineError, RunSummary};
use std::{env, path::Path};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn load_config() -> Result<PipelineConfig> {
    match env::args_os().nth(1) {
        Some(path) => {
            info!(path = %Path::new(&path).display(), "loading configuration");
            PipelineConfig::from_yaml_file(Path::new(&path))
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Diagnostic line for a failed run, `None` on success.
fn report(outcome: &std::result::Result<RunSummary, PipelineError>) -> Option<String> {
    match outcome {
        Ok(summary) => {
            info!(
                municipality_chart = %summary.municipality_chart.display(),
                network_mean_chart = %summary.network_mean_chart.display(),
                "analysis and export completed"
            );
            None
        }
        Err(e) if e.is_file_not_found() => Some(format!(
            "[file error] could not find or load the input file: {}",
            e
        )),
        Err(e) => Some(format!(
            "[execution error] the analysis pipeline failed: {}",
            e
        )),
    }
}

/// Run the pipeline once with whatever configuration loaded; failures come
/// back as a diagnostic, never as a panic or an exit status.
fn run_once(config: Result<PipelineConfig>) -> Option<String> {
    match config {
        Ok(config) => report(&pipeline::run(&config)),
        Err(e) => Some(format!(
            "[execution error] invalid configuration: {:#}",
            e
        )),
    }
}

fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();
    info!("starting IDEB approval-rate analysis");

    // ─── 2) run once; failures are reported, never signalled via exit status
    if let Some(msg) = run_once(load_config()) {
        error!("{}", msg);
    }
}
