//! Run directory layout

use crate::fs::ensure_dir;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const SCRATCH_DIR_NAME: &str = ".tmp";
pub const UPLOADS_DIR_NAME: &str = "uploads";

#[derive(Debug, Error)]
#[error("Failed to create directory {path}: {source}")]
pub struct WorkspaceError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Directories of one run, all derived from the project path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    /// Input uploads; never written by the pipeline
    pub uploads_path: PathBuf,
    /// Scratch directory every stage works in
    pub working_path: PathBuf,
    /// Where packaged results and the manifest end up
    pub results_path: PathBuf,
}

impl WorkspacePaths {
    pub fn for_project(project_path: &Path) -> Self {
        Self {
            uploads_path: project_path.join(UPLOADS_DIR_NAME),
            working_path: project_path.join(SCRATCH_DIR_NAME),
            results_path: project_path.to_path_buf(),
        }
    }
}

pub struct WorkspaceManager;

impl WorkspaceManager {
    /// Creates the project and scratch directories when absent.
    ///
    /// Existing directories and their contents are left untouched, so calling
    /// this again for the same project returns the same paths.
    pub fn prepare(project_path: &Path) -> Result<WorkspacePaths, WorkspaceError> {
        let paths = WorkspacePaths::for_project(project_path);

        for dir in [project_path, paths.working_path.as_path(), paths.results_path.as_path()] {
            ensure_dir(dir).map_err(|source| WorkspaceError {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        debug!(
            working = %paths.working_path.display(),
            results = %paths.results_path.display(),
            "Workspace ready"
        );
        Ok(paths)
    }
}
