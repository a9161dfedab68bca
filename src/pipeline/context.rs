//! Per-run project description

use std::path::{Path, PathBuf};

/// Everything one docking run needs to know about its inputs.
///
/// Built once from the job configuration and the metadata catalog, then
/// shared read-only by every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_path: PathBuf,
    pub project_name: String,
    pub receptor_id: String,
    pub ligand_id: String,
    pub receptor_file: PathBuf,
    pub ligand_file: PathBuf,
    pub num_models: u32,
    pub scoring_function: String,
}

impl ProjectContext {
    /// Base name of the receptor structure, used for fixture matching
    pub fn receptor_file_name(&self) -> &str {
        file_name(&self.receptor_file)
    }

    pub fn ligand_file_name(&self) -> &str {
        file_name(&self.ligand_file)
    }

    /// `<working>/<project_name>.<extension>`
    pub fn artifact_path(&self, working_path: &Path, extension: &str) -> PathBuf {
        working_path.join(format!("{}.{}", self.project_name, extension))
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}
