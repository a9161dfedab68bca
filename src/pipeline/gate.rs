use super::error::PipelineError;
use super::stage::Stage;
use std::fs;
use std::path::Path;

/// Post-condition check between stages.
///
/// A stage is considered successful when its declared artifact exists and is
/// not empty. The exit status of the tools is not consulted.
pub struct ArtifactGate;

impl ArtifactGate {
    pub fn check(path: &Path) -> bool {
        fs::metadata(path).map(|meta| meta.len() > 0).unwrap_or(false)
    }

    pub fn require(stage: Stage, path: &Path) -> Result<(), PipelineError> {
        if Self::check(path) {
            Ok(())
        } else {
            Err(PipelineError::MissingArtifact {
                stage,
                path: path.to_path_buf(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(!ArtifactGate::check(&temp.path().join("run1.ftdock")));
    }

    #[test]
    fn test_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run1.ftdock");
        fs::write(&path, "").unwrap();
        assert!(!ArtifactGate::check(&path));
    }

    #[test]
    fn test_single_byte() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run1.ene");
        fs::write(&path, "x").unwrap();
        assert!(ArtifactGate::check(&path));
    }

    #[test]
    fn test_require_names_stage_and_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run1.ene");

        match ArtifactGate::require(Stage::Scoring, &path) {
            Err(PipelineError::MissingArtifact { stage, path: missing }) => {
                assert_eq!(stage, Stage::Scoring);
                assert_eq!(missing, path);
            }
            other => panic!("Expected MissingArtifact, got {:?}", other),
        }
    }
}
