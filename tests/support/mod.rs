//! Shared fixtures for the docking pipeline integration tests

#![allow(dead_code)]

use dockflow::{DockflowConfig, ToolSet, TopCopyPolicy};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PROJECT: &str = "run1";
pub const NUM_MODELS: u32 = 5;

/// Conformation ids of [`energy_table`], best first
pub const RANKED_IDS: [&str; 12] = [
    "4823", "115", "9001", "12", "777", "3050", "61", "2048", "909", "5", "6000", "31",
];

pub fn energy_table() -> String {
    let mut table = String::from(
        "      Conf         Ele      Desolv         VDW       Total  RANK\n\
         --------------------------------------------------------------\n",
    );
    for (i, id) in RANKED_IDS.iter().enumerate() {
        let total = -40.0 + i as f64;
        table.push_str(&format!(
            "{:>10} {:>11.3} {:>11.3} {:>11.3} {:>11.3} {:>5}\n",
            id, -20.0, -3.5, 10.0, total, i + 1
        ));
    }
    table
}

/// A job directory with configuration, metadata and an output project path
pub struct Job {
    pub temp: TempDir,
    pub config_path: PathBuf,
    pub metadata_path: PathBuf,
    pub project_path: PathBuf,
}

impl Job {
    pub fn new(receptor_file: &str, ligand_file: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let project_path = temp.path().join("projects").join(PROJECT);
        let config_path = temp.path().join("job.json");
        let metadata_path = temp.path().join("metadata.json");

        let config = json!({
            "input_files": [
                {"name": "receptor", "value": "mol-R"},
                {"name": "ligand", "value": "mol-L"}
            ],
            "arguments": [
                {"name": "execution", "value": project_path.display().to_string()},
                {"name": "models", "value": NUM_MODELS},
                {"name": "scoring", "value": "dockser"}
            ]
        });
        fs::write(&config_path, config.to_string()).unwrap();

        let metadata = json!([
            {"_id": "mol-R", "file_path": format!("/data/uploads/{}", receptor_file)},
            {"_id": "mol-L", "file_path": format!("/data/uploads/{}", ligand_file)}
        ]);
        fs::write(&metadata_path, metadata.to_string()).unwrap();

        Self {
            temp,
            config_path,
            metadata_path,
            project_path,
        }
    }

    pub fn working_path(&self) -> PathBuf {
        self.project_path.join(".tmp")
    }

    /// Pre-computed sampling and scoring outputs in `<root>/mock/<name>`
    pub fn fixture_dir(&self, name: &str) -> PathBuf {
        let dir = self.temp.path().join("mock").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("3mfk.ftdock"), "FTDock poses\n").unwrap();
        fs::write(dir.join("3mfk.rot"), "rotations\n").unwrap();
        fs::write(dir.join("3mfk.ene"), energy_table()).unwrap();
        dir
    }

    pub fn config(&self, policy: TopCopyPolicy) -> DockflowConfig {
        DockflowConfig {
            tools: ToolSet::default(),
            mock_dna_dir: self.fixture_dir("3mfk"),
            mock_protein_dir: self.fixture_dir("3mfk_monomers"),
            mocks_enabled: true,
            concurrency: 4,
            top_copy_policy: policy,
        }
    }
}

/// Model files the structure builder writes for every ranked conformation
pub fn model_files() -> Vec<(String, String)> {
    RANKED_IDS
        .iter()
        .map(|id| {
            (
                format!("mug_{}_{}.pdb", PROJECT, id),
                format!("REMARK conformation {}\nATOM      1  P    DA B   1\n", id),
            )
        })
        .collect()
}

pub fn manifest_paths(manifest_path: &Path) -> Vec<(String, String)> {
    let raw = fs::read_to_string(manifest_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["output_files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            (
                entry["name"].as_str().unwrap().to_string(),
                entry["file_path"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

/// Entry paths inside a gzip tar archive
pub fn archive_entries(archive: &Path) -> Vec<String> {
    let file = fs::File::open(archive).unwrap();
    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(file));
    tar.entries()
        .unwrap()
        .map(|entry| entry.unwrap().path().unwrap().display().to_string())
        .collect()
}
