pub mod best_effort;
pub mod context;
pub mod error;
pub mod gate;
pub mod manifest;
pub mod mock;
pub mod orchestrator;
pub mod packaging;
pub mod ranking;
pub mod stage;
pub mod workspace;

pub use best_effort::BestEffortTally;
pub use context::ProjectContext;
pub use error::PipelineError;
pub use gate::ArtifactGate;
pub use manifest::{CompletionMarker, OutputFile, OutputManifest, MANIFEST_FILE};
pub use mock::{MockMode, MockProfile, MockSelector};
pub use orchestrator::{PipelineOrchestrator, PipelineOutcome};
pub use packaging::{PackagingReport, ResultPackager, TopCopyPolicy};
pub use ranking::{RankedEntry, RankedTableReader};
pub use stage::{ModelReport, Stage, StageContext, StageOutput, StageRunner};
pub use workspace::{WorkspaceError, WorkspaceManager, WorkspacePaths};
