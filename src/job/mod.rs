//! Job configuration and metadata catalog loading
//!
//! The job platform hands over two JSON documents: the job configuration
//! (input roles and run arguments) and the metadata catalog (where each input
//! lives on disk). [`load_project`] turns them into a [`ProjectContext`], and
//! any missing or malformed field aborts the run before a stage starts.

mod config;
mod metadata;

pub use config::{JobArgument, JobConfig};
pub use metadata::{MetadataCatalog, MetadataEntry};

use crate::pipeline::ProjectContext;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to read {kind} file {path}: {source}")]
    Read {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {kind} JSON in {path}: {source}")]
    Parse {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected exactly two input files, found {0}")]
    InputFileCount(usize),

    #[error("Input file '{0}' has no identifier value")]
    MissingInputValue(String),

    #[error("Missing required argument '{0}'")]
    MissingArgument(&'static str),

    #[error("Invalid value for argument '{name}': {value}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("Execution path {0} has no final path segment to name the project")]
    UnnamedProject(PathBuf),

    #[error("Identifier '{0}' not found in metadata catalog")]
    UnknownId(String),

    #[error("Metadata entry '{0}' has no file_path")]
    MissingFilePath(String),
}

/// Loads both documents and resolves the run's project context
pub fn load_project(config_path: &Path, metadata_path: &Path) -> Result<ProjectContext, JobError> {
    let config = JobConfig::from_file(config_path)?;
    let catalog = MetadataCatalog::from_file(metadata_path)?;
    let project = resolve_project(&config, &catalog)?;

    info!(
        project = %project.project_name,
        receptor = %project.receptor_file.display(),
        ligand = %project.ligand_file.display(),
        models = project.num_models,
        scoring = %project.scoring_function,
        "Job configuration loaded"
    );

    Ok(project)
}

/// Combines an already parsed configuration and catalog
pub fn resolve_project(
    config: &JobConfig,
    catalog: &MetadataCatalog,
) -> Result<ProjectContext, JobError> {
    let (receptor_id, ligand_id) = config.molecule_ids()?;
    let project_path = config.project_path()?;
    let project_name = project_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| JobError::UnnamedProject(project_path.clone()))?;
    let num_models = config.num_models()?;
    let scoring_function = config.scoring_function()?;

    let receptor_file = catalog.file_path(&receptor_id)?;
    let ligand_file = catalog.file_path(&ligand_id)?;
    debug!(%receptor_id, %ligand_id, "Resolved molecule identifiers");

    Ok(ProjectContext {
        project_path,
        project_name,
        receptor_id,
        ligand_id,
        receptor_file,
        ligand_file,
        num_models,
        scoring_function,
    })
}
