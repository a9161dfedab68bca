//! The completion manifest read by the hosting platform

use super::packaging::{top_file_name, RESULTS_CSV_FILE, TOP_MODELS, TOP_STRUCTURES_FILE};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MANIFEST_FILE: &str = ".results.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFile {
    pub name: String,
    pub source_id: Vec<String>,
    pub taxon_id: String,
    pub meta_data: Map<String, Value>,
    pub file_path: String,
}

impl OutputFile {
    fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            source_id: vec![String::new()],
            taxon_id: String::new(),
            meta_data: Map::new(),
            file_path: path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputManifest {
    pub output_files: Vec<OutputFile>,
}

impl OutputManifest {
    /// Fixed entry list: combined structures, archive, CSV, then the ten top files
    pub fn for_project(results_path: &Path, project_name: &str) -> Self {
        let mut output_files = vec![
            OutputFile::new("top_structures", results_path.join(TOP_STRUCTURES_FILE)),
            OutputFile::new("results", results_path.join(format!("{}.tgz", project_name))),
            OutputFile::new("energy_table", results_path.join(RESULTS_CSV_FILE)),
        ];
        output_files.extend(
            (1..=TOP_MODELS).map(|slot| OutputFile::new("top10", results_path.join(top_file_name(slot)))),
        );
        Self { output_files }
    }

    /// Listed files that do not exist on disk
    pub fn missing_files(&self) -> Vec<&str> {
        self.output_files
            .iter()
            .map(|f| f.file_path.as_str())
            .filter(|path| !Path::new(path).is_file())
            .collect()
    }
}

pub struct CompletionMarker;

impl CompletionMarker {
    /// Writes `<results>/.results.json`; its presence marks the run as successful.
    ///
    /// Refuses to write while any listed file is missing.
    pub fn write(results_path: &Path, project_name: &str) -> Result<PathBuf> {
        let manifest = OutputManifest::for_project(results_path, project_name);
        let missing = manifest.missing_files();
        if !missing.is_empty() {
            bail!("Results are incomplete, missing: {}", missing.join(", "));
        }
        let path = results_path.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&manifest)
            .context("Failed to serialize results manifest")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        info!(manifest = %path.display(), entries = manifest.output_files.len(), "Run marked complete");
        Ok(path)
    }
}
