//! Progress handler trait and events

use std::path::PathBuf;
use std::time::Duration;

/// Events emitted while a docking run progresses
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started for a project directory
    Started { project: String, project_path: PathBuf },

    /// A pipeline stage started
    StageStarted { stage: String },

    /// A pipeline stage finished
    StageComplete { stage: String, duration: Duration },

    /// Fixture data replaces the sampling and scoring tools for this run
    MockingActivated { profile: String, fixture_dir: PathBuf },

    /// A stage's declared artifact is missing or empty
    ArtifactMissing { stage: String, path: PathBuf },

    /// A best-effort step skipped some items
    BestEffortSkipped {
        operation: String,
        skipped: usize,
        attempted: usize,
    },

    /// Manifest written, run succeeded
    Completed {
        manifest_path: PathBuf,
        total_time: Duration,
    },

    /// Run aborted
    Failed { error: String },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpHandler;
        handler.on_progress(&ProgressEvent::StageStarted {
            stage: "Sampling".to_string(),
        });
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::Started {
            project: "run1".to_string(),
            project_path: PathBuf::from("/tmp/run1"),
        });
        handler.on_progress(&ProgressEvent::StageComplete {
            stage: "Setup".to_string(),
            duration: Duration::from_millis(50),
        });
        handler.on_progress(&ProgressEvent::Completed {
            manifest_path: PathBuf::from("/tmp/run1/.results.json"),
            total_time: Duration::from_secs(5),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::StageStarted {
            stage: "Scoring".to_string(),
        };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("StageStarted"));
        assert!(debug_str.contains("Scoring"));
    }
}
