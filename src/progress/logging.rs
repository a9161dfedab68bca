//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started {
                project,
                project_path,
            } => {
                info!(project = %project, path = %project_path.display(), "Starting docking run");
            }
            ProgressEvent::StageStarted { stage } => {
                info!(stage = %stage, status = "RUNNING", "Stage started");
            }
            ProgressEvent::StageComplete { stage, duration } => {
                info!(
                    stage = %stage,
                    status = "DONE",
                    duration_ms = duration.as_millis(),
                    "Stage complete"
                );
            }
            ProgressEvent::MockingActivated {
                profile,
                fixture_dir,
            } => {
                info!(profile = %profile, fixtures = %fixture_dir.display(), "Mocking activated");
            }
            ProgressEvent::ArtifactMissing { stage, path } => {
                error!(stage = %stage, artifact = %path.display(), "Stage output file not found");
            }
            ProgressEvent::BestEffortSkipped {
                operation,
                skipped,
                attempted,
            } => {
                warn!(
                    operation = %operation,
                    skipped,
                    attempted,
                    "Best-effort step skipped items"
                );
            }
            ProgressEvent::Completed {
                manifest_path,
                total_time,
            } => {
                info!(
                    manifest = %manifest_path.display(),
                    total_time_ms = total_time.as_millis(),
                    "Docking run complete"
                );
            }
            ProgressEvent::Failed { error } => {
                error!(error = %error, "Docking run failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::Started {
                project: "run1".to_string(),
                project_path: PathBuf::from("/tmp/run1"),
            },
            ProgressEvent::StageStarted {
                stage: "Sampling".to_string(),
            },
            ProgressEvent::StageComplete {
                stage: "Sampling".to_string(),
                duration: Duration::from_millis(10),
            },
            ProgressEvent::MockingActivated {
                profile: "protein-dna".to_string(),
                fixture_dir: PathBuf::from("/mock/3mfk"),
            },
            ProgressEvent::ArtifactMissing {
                stage: "Scoring".to_string(),
                path: PathBuf::from("/tmp/run1/.tmp/run1.ene"),
            },
            ProgressEvent::BestEffortSkipped {
                operation: "combine top structures".to_string(),
                skipped: 2,
                attempted: 10,
            },
            ProgressEvent::Completed {
                manifest_path: PathBuf::from("/tmp/run1/.results.json"),
                total_time: Duration::from_secs(5),
            },
            ProgressEvent::Failed {
                error: "Test error".to_string(),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
