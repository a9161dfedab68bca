//! The four docking stages and how each one produces its artifacts

use super::best_effort::BestEffortTally;
use super::context::ProjectContext;
use super::mock::MockMode;
use super::packaging::{ResultPackager, TopCopyPolicy, MODELS_PREFIX, TOP_MODELS};
use super::ranking::{RankedEntry, RankedTableReader};
use super::workspace::WorkspacePaths;
use crate::config::{DockflowConfig, ToolSet};
use crate::fs::copy_file;
use crate::process::{ToolInvocation, ToolRunner};
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

const SETUP_LOG_FILE: &str = "setup.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Setup,
    Sampling,
    Scoring,
    ModelGeneration,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Setup => "Setup",
            Stage::Sampling => "Sampling",
            Stage::Scoring => "Scoring",
            Stage::ModelGeneration => "Generating models",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view a stage gets of the run
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub project: &'a ProjectContext,
    pub paths: &'a WorkspacePaths,
    pub mode: &'a MockMode,
}

impl StageContext<'_> {
    pub fn working_path(&self) -> &Path {
        &self.paths.working_path
    }

    pub fn artifact(&self, extension: &str) -> PathBuf {
        self.project.artifact_path(&self.paths.working_path, extension)
    }
}

/// Results of model generation
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub top: Vec<RankedEntry>,
    pub combined: BestEffortTally,
    /// Number of `top_N.pdb` files written
    pub top_copies: usize,
    pub relocated: BestEffortTally,
}

impl ModelReport {
    pub fn tallies(&self) -> [&BestEffortTally; 2] {
        [&self.combined, &self.relocated]
    }
}

#[derive(Debug, Clone)]
pub enum StageOutput {
    /// Prepared receptor and ligand structures
    Molecules { receptor: PathBuf, ligand: PathBuf },
    /// Declared output file, checked before the next stage runs
    Artifact(PathBuf),
    Models(ModelReport),
}

impl StageOutput {
    pub fn artifact(&self) -> Option<&Path> {
        match self {
            StageOutput::Artifact(path) => Some(path),
            _ => None,
        }
    }
}

/// Runs stages through the external docking tools.
///
/// Tool exit status is only logged. Whether a stage worked is decided
/// afterwards from the files it left in the working directory.
pub struct StageRunner {
    runner: Arc<dyn ToolRunner>,
    tools: ToolSet,
    concurrency: usize,
    top_copy_policy: TopCopyPolicy,
}

impl StageRunner {
    pub fn new(
        runner: Arc<dyn ToolRunner>,
        tools: ToolSet,
        concurrency: usize,
        top_copy_policy: TopCopyPolicy,
    ) -> Self {
        Self {
            runner,
            tools,
            concurrency: concurrency.max(1),
            top_copy_policy,
        }
    }

    pub fn from_config(config: &DockflowConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self::new(
            runner,
            config.tools.clone(),
            config.concurrency,
            config.top_copy_policy,
        )
    }

    pub async fn run_stage(&self, stage: Stage, ctx: &StageContext<'_>) -> Result<StageOutput> {
        match stage {
            Stage::Setup => self.setup(ctx).await,
            Stage::Sampling => self.sampling(ctx).await,
            Stage::Scoring => self.scoring(ctx).await,
            Stage::ModelGeneration => self.generate_models(ctx).await,
        }
    }

    /// Writes the docking ini file and prepares both molecules
    pub async fn setup(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let name = &ctx.project.project_name;
        let working = ctx.working_path();

        self.invoke(
            ToolInvocation::new(&self.tools.setup_script, working).args([
                name.clone(),
                ctx.project.receptor_file.display().to_string(),
                ctx.project.ligand_file.display().to_string(),
            ]),
        )
        .await;

        self.invoke(
            ToolInvocation::new(&self.tools.pydock_bin, working)
                .args([name.as_str(), "setup"])
                .stdout_to(SETUP_LOG_FILE),
        )
        .await;

        let (receptor, ligand) = prepared_molecules(working, name);
        Ok(StageOutput::Molecules { receptor, ligand })
    }

    /// Produces `<project>.ftdock` and `<project>.rot`
    pub async fn sampling(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let name = &ctx.project.project_name;
        let working = ctx.working_path();

        if ctx.mode.is_mocked() {
            copy_fixture(ctx, "ftdock");
            copy_fixture(ctx, "rot");
        } else {
            let (receptor, ligand) = prepared_molecules(working, name);
            self.invoke(ToolInvocation::new(&self.tools.sampling_script, working).args([
                name.clone(),
                receptor.display().to_string(),
                ligand.display().to_string(),
                self.concurrency.to_string(),
            ]))
            .await;

            self.invoke(
                ToolInvocation::new(&self.tools.pydock_bin, working).args([name.as_str(), "rotftdock"]),
            )
            .await;
        }

        Ok(StageOutput::Artifact(ctx.artifact("ftdock")))
    }

    /// Produces the energy table `<project>.ene`
    pub async fn scoring(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let name = &ctx.project.project_name;

        if ctx.mode.is_mocked() {
            copy_fixture(ctx, "ene");
        } else {
            self.invoke(
                ToolInvocation::new(&self.tools.scoring_script, ctx.working_path()).args([
                    name.clone(),
                    self.concurrency.to_string(),
                    ctx.project.scoring_function.clone(),
                ]),
            )
            .await;
        }

        Ok(StageOutput::Artifact(ctx.artifact("ene")))
    }

    /// Builds model structures for the best conformations and assembles the
    /// top structure files
    pub async fn generate_models(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let name = &ctx.project.project_name;
        let table = ctx.artifact("ene");

        self.invoke(
            ToolInvocation::new(&self.tools.pydock_bin, ctx.working_path()).args([
                name.clone(),
                "makePDB".to_string(),
                "1".to_string(),
                ctx.project.num_models.to_string(),
                format!("{}.ene", name),
                MODELS_PREFIX.to_string(),
            ]),
        )
        .await;

        let top = RankedTableReader::top_k(&table, TOP_MODELS)?;
        debug!(
            top = ?top.iter().map(|e| e.conformation_id.as_str()).collect::<Vec<_>>(),
            "Top conformations"
        );

        let packager = ResultPackager::new(ctx.project, ctx.paths);
        let combined = packager.combine_top_structures(&top)?;
        let top_copies = packager.copy_top_files(&top, self.top_copy_policy)?;
        let relocated = packager.relocate_models()?;

        Ok(StageOutput::Models(ModelReport {
            top,
            combined,
            top_copies,
            relocated,
        }))
    }

    /// Runs a tool and waits for it. Launch failures are logged only.
    async fn invoke(&self, invocation: ToolInvocation) {
        info!(command = %invocation, cwd = %invocation.working_dir.display(), "Running tool");
        match self.runner.run(&invocation).await {
            Ok(outcome) => {
                debug!(
                    program = %invocation.program,
                    exit_code = ?outcome.exit_code,
                    success = outcome.success,
                    "Tool finished"
                );
            }
            Err(e) => {
                warn!(program = %invocation.program, error = %format!("{:#}", e), "Failed to run tool");
            }
        }
    }
}

/// `<project>_rec.pdb` and `<project>_lig.pdb`, as written by the setup tool
fn prepared_molecules(working_path: &Path, project_name: &str) -> (PathBuf, PathBuf) {
    (
        working_path.join(format!("{}_rec.pdb", project_name)),
        working_path.join(format!("{}_lig.pdb", project_name)),
    )
}

/// Copies `<stem>.<extension>` from the fixture set as `<project>.<extension>`
fn copy_fixture(ctx: &StageContext<'_>, extension: &str) {
    let Some(source) = ctx.mode.fixture_file(extension) else {
        return;
    };
    let destination = ctx.artifact(extension);
    match copy_file(&source, &destination) {
        Ok(bytes) => debug!(
            fixture = %source.display(),
            destination = %destination.display(),
            bytes,
            "Fixture copied"
        ),
        Err(e) => warn!(
            fixture = %source.display(),
            error = %format!("{:#}", e),
            "Failed to copy fixture"
        ),
    }
}
