use super::best_effort::BestEffortTally;
use super::context::ProjectContext;
use super::error::PipelineError;
use super::gate::ArtifactGate;
use super::manifest::CompletionMarker;
use super::mock::{MockMode, MockSelector};
use super::packaging::{PackagingReport, ResultPackager};
use super::stage::{ModelReport, Stage, StageContext, StageOutput, StageRunner};
use super::workspace::WorkspaceManager;
use crate::config::DockflowConfig;
use crate::process::ToolRunner;
use crate::progress::{ProgressEvent, ProgressHandler};
use anyhow::anyhow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const PACKAGING_STEP: &str = "Packaging results";

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub manifest_path: PathBuf,
    pub mode: MockMode,
    pub models: ModelReport,
    pub packaging: PackagingReport,
    pub total_time: Duration,
}

impl PipelineOutcome {
    pub fn tallies(&self) -> impl Iterator<Item = &BestEffortTally> {
        self.models
            .tallies()
            .into_iter()
            .chain(self.packaging.tallies())
    }
}

pub struct PipelineOrchestrator {
    selector: MockSelector,
    stages: StageRunner,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    pub fn new(
        selector: MockSelector,
        stages: StageRunner,
        progress_handler: Option<Arc<dyn ProgressHandler>>,
    ) -> Self {
        Self {
            selector,
            stages,
            progress_handler,
        }
    }

    pub fn from_config(
        config: &DockflowConfig,
        runner: Arc<dyn ToolRunner>,
        progress_handler: Option<Arc<dyn ProgressHandler>>,
    ) -> Self {
        Self::new(
            MockSelector::from_config(config),
            StageRunner::from_config(config, runner),
            progress_handler,
        )
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    /// Runs setup, sampling, scoring and model generation, packages the
    /// results and writes the completion manifest.
    ///
    /// Stops at the first stage whose artifact is missing; nothing after it
    /// runs and no manifest is written.
    pub async fn execute(&self, project: &ProjectContext) -> Result<PipelineOutcome, PipelineError> {
        let start = Instant::now();
        info!(
            project = %project.project_name,
            path = %project.project_path.display(),
            "Starting docking pipeline"
        );
        self.emit(ProgressEvent::Started {
            project: project.project_name.clone(),
            project_path: project.project_path.clone(),
        });

        let result = self.run(project, start).await;
        if let Err(e) = &result {
            self.emit(ProgressEvent::Failed {
                error: e.to_string(),
            });
        }
        result
    }

    async fn run(
        &self,
        project: &ProjectContext,
        start: Instant,
    ) -> Result<PipelineOutcome, PipelineError> {
        let paths = WorkspaceManager::prepare(&project.project_path)?;
        let mode = self
            .selector
            .select(project.receptor_file_name(), project.ligand_file_name());
        let ctx = StageContext {
            project,
            paths: &paths,
            mode: &mode,
        };

        self.run_stage(Stage::Setup, &ctx).await?;

        if let MockMode::Fixture(profile) = &mode {
            self.emit(ProgressEvent::MockingActivated {
                profile: profile.name.clone(),
                fixture_dir: profile.fixture_dir.clone(),
            });
        }

        self.run_stage(Stage::Sampling, &ctx).await?;
        self.run_stage(Stage::Scoring, &ctx).await?;

        let models = match self.run_stage(Stage::ModelGeneration, &ctx).await? {
            StageOutput::Models(report) => report,
            other => {
                return Err(PipelineError::stage(
                    Stage::ModelGeneration,
                    anyhow!("unexpected stage output: {:?}", other),
                ))
            }
        };
        self.report_tallies(models.tallies());

        self.emit(ProgressEvent::StageStarted {
            stage: PACKAGING_STEP.to_string(),
        });
        let packaging_start = Instant::now();
        let packaging = ResultPackager::new(project, &paths)
            .package()
            .map_err(PipelineError::Packaging)?;
        self.report_tallies(packaging.tallies());
        self.emit(ProgressEvent::StageComplete {
            stage: PACKAGING_STEP.to_string(),
            duration: packaging_start.elapsed(),
        });

        let manifest_path = CompletionMarker::write(&paths.results_path, &project.project_name)
            .map_err(PipelineError::Manifest)?;

        let total_time = start.elapsed();
        self.emit(ProgressEvent::Completed {
            manifest_path: manifest_path.clone(),
            total_time,
        });

        Ok(PipelineOutcome {
            manifest_path,
            mode,
            models,
            packaging,
            total_time,
        })
    }

    async fn run_stage(
        &self,
        stage: Stage,
        ctx: &StageContext<'_>,
    ) -> Result<StageOutput, PipelineError> {
        self.emit(ProgressEvent::StageStarted {
            stage: stage.to_string(),
        });
        let stage_start = Instant::now();

        let output = self
            .stages
            .run_stage(stage, ctx)
            .await
            .map_err(|e| PipelineError::stage(stage, e))?;

        if let Some(artifact) = output.artifact() {
            if let Err(e) = ArtifactGate::require(stage, artifact) {
                self.emit(ProgressEvent::ArtifactMissing {
                    stage: stage.to_string(),
                    path: artifact.to_path_buf(),
                });
                return Err(e);
            }
        }

        self.emit(ProgressEvent::StageComplete {
            stage: stage.to_string(),
            duration: stage_start.elapsed(),
        });
        debug!(stage = %stage, "Stage complete");
        Ok(output)
    }

    fn report_tallies<'a>(&self, tallies: impl IntoIterator<Item = &'a BestEffortTally>) {
        for tally in tallies {
            debug!(tally = %tally, "Best-effort step finished");
            if !tally.is_clean() {
                self.emit(ProgressEvent::BestEffortSkipped {
                    operation: tally.operation.clone(),
                    skipped: tally.skipped_count(),
                    attempted: tally.attempted,
                });
            }
        }
    }
}
