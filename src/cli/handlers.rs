use super::commands::CliArgs;
use crate::config::DockflowConfig;
use crate::job::load_project;
use crate::pipeline::PipelineOrchestrator;
use crate::process::{ProcessRunner, ToolRunner};
use crate::progress::LoggingHandler;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PIPELINE_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Runs one job with the real docking tools
pub async fn handle_run(args: &CliArgs) -> i32 {
    run_with(args, DockflowConfig::default(), Arc::new(ProcessRunner::new())).await
}

/// Runs one job with the given settings and tool runner, returning the exit code
pub async fn run_with(args: &CliArgs, config: DockflowConfig, runner: Arc<dyn ToolRunner>) -> i32 {
    debug!(
        out_metadata = %args.out_metadata.display(),
        "Output metadata path accepted, nothing is written to it"
    );

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return EXIT_CONFIG_ERROR;
    }
    debug!(?config, "Configuration loaded");

    let project = match load_project(&args.config, &args.in_metadata) {
        Ok(project) => project,
        Err(e) => {
            error!(error = %e, "Failed to load job configuration");
            return EXIT_CONFIG_ERROR;
        }
    };

    let orchestrator =
        PipelineOrchestrator::from_config(&config, runner, Some(Arc::new(LoggingHandler)));

    match orchestrator.execute(&project).await {
        Ok(outcome) => {
            let skipped: usize = outcome.tallies().map(|t| t.skipped_count()).sum();
            info!(
                manifest = %outcome.manifest_path.display(),
                mode = outcome.mode.label(),
                skipped,
                total_time_ms = outcome.total_time.as_millis(),
                "Docking finished"
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Docking pipeline failed");
            EXIT_PIPELINE_FAILURE
        }
    }
}
