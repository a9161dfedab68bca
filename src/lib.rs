//! dockflow - batch orchestrator for protein-DNA and protein-protein docking
//!
//! One run takes a job configuration and a metadata catalog, prepares a
//! per-project workspace and drives the pyDock tool chain through four
//! stages: setup, sampling, scoring and model generation. The best models are
//! collected, a CSV summary and an archive of the working files are written,
//! and a `.results.json` manifest marks the run as complete.
//!
//! # Example Usage
//!
//! ```ignore
//! use dockflow::{load_project, DockflowConfig, PipelineOrchestrator, ProcessRunner};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! async fn dock() -> anyhow::Result<()> {
//!     let project = load_project(Path::new("job.json"), Path::new("metadata.json"))?;
//!     let config = DockflowConfig::default();
//!     let orchestrator = PipelineOrchestrator::from_config(&config, Arc::new(ProcessRunner::new()), None);
//!
//!     let outcome = orchestrator.execute(&project).await?;
//!     println!("Manifest: {}", outcome.manifest_path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`job`]: job configuration and metadata catalog parsing
//! - [`pipeline`]: workspace, stages, artifact gate, packaging and manifest
//! - [`process`]: external tool invocation
//! - [`progress`]: stage progress reporting

pub mod cli;
pub mod config;
pub mod fs;
pub mod job;
pub mod pipeline;
pub mod process;
pub mod progress;
pub mod util;

pub use config::{ConfigError, DockflowConfig, ToolSet};
pub use job::{load_project, JobError};
pub use pipeline::{
    PipelineError, PipelineOrchestrator, PipelineOutcome, ProjectContext, TopCopyPolicy,
};
pub use process::{ProcessRunner, ScriptedToolRunner, ToolInvocation, ToolRunner};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_dockflow() {
        assert_eq!(NAME, "dockflow");
    }
}
