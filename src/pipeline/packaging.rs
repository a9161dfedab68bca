//! Result assembly: top structures, CSV summary and the run archive

use super::best_effort::BestEffortTally;
use super::context::ProjectContext;
use super::ranking::{RankedEntry, RankedTableReader};
use super::workspace::WorkspacePaths;
use crate::fs::{
    copy_file, create_tar_gz, ensure_dir, matching_entries, move_path, remove_path,
    visible_entries,
};
use anyhow::{Context, Result};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

pub const TOP_STRUCTURES_FILE: &str = "top_structures.pdb";
pub const RESULTS_CSV_FILE: &str = "result.csv";
pub const MODELS_DIR_NAME: &str = "models";
pub const MODELS_PREFIX: &str = "mug_";
/// Number of `top_N.pdb` files and of conformations in the combined file
pub const TOP_MODELS: usize = 10;

const SCORING_TEMP_PREFIX: &str = "tmp_pyDock";
const SCRATCH_PREFIX: &str = "scratch";

/// Which conformation goes into each `top_N.pdb` slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopCopyPolicy {
    /// Every slot holds the best-ranked conformation
    #[default]
    BestOnly,
    /// Slot N holds the Nth ranked conformation
    PerRank,
}

impl FromStr for TopCopyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best-only" | "best_only" | "best" => Ok(TopCopyPolicy::BestOnly),
            "per-rank" | "per_rank" | "rank" => Ok(TopCopyPolicy::PerRank),
            other => Err(format!(
                "Invalid top copy policy: {}. Valid options: best-only, per-rank",
                other
            )),
        }
    }
}

impl fmt::Display for TopCopyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopCopyPolicy::BestOnly => write!(f, "best-only"),
            TopCopyPolicy::PerRank => write!(f, "per-rank"),
        }
    }
}

/// `mug_<project>_<conformation>.pdb`, as written by the model builder
pub fn model_file_name(project_name: &str, conformation_id: &str) -> String {
    format!("{}{}_{}.pdb", MODELS_PREFIX, project_name, conformation_id)
}

pub fn top_file_name(slot: usize) -> String {
    format!("top_{}.pdb", slot)
}

/// What packaging did, per best-effort step
#[derive(Debug, Clone)]
pub struct PackagingReport {
    pub cleanup: BestEffortTally,
    pub collected: BestEffortTally,
    pub archived: BestEffortTally,
    pub csv_rows: usize,
    pub archive_path: PathBuf,
}

impl PackagingReport {
    pub fn tallies(&self) -> [&BestEffortTally; 3] {
        [&self.cleanup, &self.collected, &self.archived]
    }
}

pub struct ResultPackager {
    working_path: PathBuf,
    results_path: PathBuf,
    project_name: String,
    num_models: usize,
}

impl ResultPackager {
    pub fn new(project: &ProjectContext, paths: &WorkspacePaths) -> Self {
        Self {
            working_path: paths.working_path.clone(),
            results_path: paths.results_path.clone(),
            project_name: project.project_name.clone(),
            num_models: project.num_models as usize,
        }
    }

    fn working_file(&self, name: &str) -> PathBuf {
        self.working_path.join(name)
    }

    fn model_path(&self, entry: &RankedEntry) -> PathBuf {
        self.working_file(&model_file_name(&self.project_name, &entry.conformation_id))
    }

    /// Concatenates the ranked model files into `top_structures.pdb`.
    ///
    /// Records are wrapped in `MODEL n` / `ENDMDL` and numbered from 1 in rank
    /// order. Conformations without a model file are skipped and do not use
    /// up a model number.
    pub fn combine_top_structures(&self, top: &[RankedEntry]) -> Result<BestEffortTally> {
        let output_path = self.working_file(TOP_STRUCTURES_FILE);
        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut output = BufWriter::new(file);
        let mut tally = BestEffortTally::new("combine top structures");
        let mut model_number = 1;

        for entry in top {
            let path = self.model_path(entry);
            let contents = match fs::read(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tally.skip(path.display(), e);
                    continue;
                }
            };

            writeln!(output, "MODEL {}", model_number)?;
            output.write_all(&contents)?;
            if !contents.ends_with(b"\n") {
                writeln!(output)?;
            }
            writeln!(output, "ENDMDL")?;
            model_number += 1;
            tally.success();
        }

        output
            .flush()
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(tally)
    }

    /// Fills `top_1.pdb` .. `top_10.pdb` in the working directory.
    ///
    /// Every slot must be written. Under `PerRank`, slots past the end of the
    /// ranking hold the best conformation. Fails when nothing was ranked or a
    /// chosen model file cannot be copied.
    pub fn copy_top_files(&self, top: &[RankedEntry], policy: TopCopyPolicy) -> Result<usize> {
        let best = top
            .first()
            .context("No ranked conformation to fill the top structure files")?;

        for slot in 1..=TOP_MODELS {
            let entry = match policy {
                TopCopyPolicy::BestOnly => best,
                TopCopyPolicy::PerRank => top.get(slot - 1).unwrap_or(best),
            };
            copy_file(&self.model_path(entry), &self.working_file(&top_file_name(slot)))?;
        }

        debug!(best = %best.conformation_id, policy = %policy, "Top structure files written");
        Ok(TOP_MODELS)
    }

    /// Moves every `mug_*.pdb` into a fresh `models/` subdirectory
    pub fn relocate_models(&self) -> Result<BestEffortTally> {
        let models_path = self.working_file(MODELS_DIR_NAME);
        if models_path.exists() {
            remove_path(&models_path)
                .with_context(|| format!("Failed to clear {}", models_path.display()))?;
        }
        ensure_dir(&models_path)
            .with_context(|| format!("Failed to create {}", models_path.display()))?;

        let mut tally = BestEffortTally::new("relocate models");
        for model in matching_entries(&self.working_path, MODELS_PREFIX, ".pdb")? {
            let result = move_path(&model, &models_path);
            tally.record(model.display(), result);
        }

        debug!(moved = tally.succeeded, "Models relocated");
        Ok(tally)
    }

    /// Removes scoring temp folders, sampling scratch files and the sampling log
    pub fn clean_workspace(&self) -> BestEffortTally {
        let mut tally = BestEffortTally::new("clean workspace");

        for prefix in [SCORING_TEMP_PREFIX, SCRATCH_PREFIX] {
            match matching_entries(&self.working_path, prefix, "") {
                Ok(entries) => {
                    for entry in entries {
                        let result = remove_path(&entry);
                        tally.record(entry.display(), result);
                    }
                }
                Err(e) => tally.skip(format!("{}*", prefix), e),
            }
        }

        let sampling_log = self.working_file(&format!("{}.ftdock.log", self.project_name));
        if sampling_log.exists() {
            let result = fs::remove_file(&sampling_log);
            tally.record(sampling_log.display(), result);
        }

        tally
    }

    /// Moves the combined file and the top copies to the results directory
    fn collect_top_files(&self, tally: &mut BestEffortTally) {
        let names = std::iter::once(TOP_STRUCTURES_FILE.to_string())
            .chain((1..=TOP_MODELS).map(top_file_name));
        for name in names {
            let result = move_path(&self.working_file(&name), &self.results_path);
            tally.record(&name, result);
        }
    }

    /// Moves all remaining working files under `<project_name>/` and archives
    /// that directory as `<project_name>.tgz` in the working directory
    fn compress(&self) -> Result<(BestEffortTally, PathBuf)> {
        let archive_root = self.working_file(&self.project_name);
        let to_move: Vec<PathBuf> = visible_entries(&self.working_path)?
            .into_iter()
            .filter(|entry| entry != &archive_root)
            .collect();

        ensure_dir(&archive_root)
            .with_context(|| format!("Failed to create {}", archive_root.display()))?;

        let mut tally = BestEffortTally::new("archive working files");
        for entry in to_move {
            let result = move_path(&entry, &archive_root);
            tally.record(entry.display(), result);
        }

        let archive_path = self.working_file(&format!("{}.tgz", self.project_name));
        create_tar_gz(&archive_root, &archive_path)?;
        Ok((tally, archive_path))
    }

    /// Cleans the workspace and assembles everything in the results directory
    pub fn package(&self) -> Result<PackagingReport> {
        let cleanup = self.clean_workspace();

        let mut collected = BestEffortTally::new("collect results");
        self.collect_top_files(&mut collected);

        let table = self.working_file(&format!("{}.ene", self.project_name));
        let csv_path = self.results_path.join(RESULTS_CSV_FILE);
        let csv_rows = RankedTableReader::to_delimited(&table, &csv_path, self.num_models, true)?;

        let (archived, archive_path) = self.compress()?;
        let final_archive = match move_path(&archive_path, &self.results_path) {
            Ok(moved) => {
                collected.success();
                moved
            }
            Err(e) => {
                collected.skip(archive_path.display(), e);
                archive_path
            }
        };

        info!(
            csv_rows,
            archive = %final_archive.display(),
            "Results packaged"
        );

        Ok(PackagingReport {
            cleanup,
            collected,
            archived,
            csv_rows,
            archive_path: final_archive,
        })
    }
}
