use super::stage::Stage;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Workspace error: {0}")]
    Workspace(#[from] super::workspace::WorkspaceError),

    #[error("{stage} process, output file not found: {path}")]
    MissingArtifact { stage: Stage, path: PathBuf },

    #[error("{stage} stage failed: {source:#}")]
    Stage {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    #[error("Packaging failed: {0:#}")]
    Packaging(anyhow::Error),

    #[error("Failed to write results manifest: {0:#}")]
    Manifest(anyhow::Error),
}

impl PipelineError {
    pub fn stage(stage: Stage, source: anyhow::Error) -> Self {
        Self::Stage { stage, source }
    }
}
