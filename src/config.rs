//! Configuration management for dockflow
//!
//! Settings are loaded from environment variables with defaults matching the
//! production docking host. The job-specific parameters (project path, models,
//! scoring function) come from the job configuration file instead; see
//! [`crate::job`].
//!
//! # Environment Variables
//!
//! - `DOCKFLOW_SETUP_SCRIPT`: setup tool - default: "prepare_ini_file.py"
//! - `DOCKFLOW_PYDOCK_BIN`: docking toolkit binary - default: "pydock3"
//! - `DOCKFLOW_SAMPLING_SCRIPT`: sampling tool - default: "run_ftdock.sh"
//! - `DOCKFLOW_SCORING_SCRIPT`: scoring tool - default: "parallel_scoring.py"
//! - `DOCKFLOW_MOCK_DNA_DIR`: protein-DNA fixture directory
//! - `DOCKFLOW_MOCK_PROTEIN_DIR`: protein-protein fixture directory
//! - `DOCKFLOW_MOCKS_ENABLED`: allow fixture substitution (true|false) - default: "true"
//! - `DOCKFLOW_CONCURRENCY`: processing units handed to sampling/scoring - default: CPU count
//! - `DOCKFLOW_TOP_COPY_POLICY`: `best-only` | `per-rank` - default: "best-only"

use crate::pipeline::TopCopyPolicy;
use std::env;
use std::path::PathBuf;
use sysinfo::System;
use thiserror::Error;

const DEFAULT_SETUP_SCRIPT: &str = "prepare_ini_file.py";
const DEFAULT_PYDOCK_BIN: &str = "pydock3";
const DEFAULT_SAMPLING_SCRIPT: &str = "run_ftdock.sh";
const DEFAULT_SCORING_SCRIPT: &str = "parallel_scoring.py";
const DEFAULT_MOCK_DNA_DIR: &str = "/home/user/bin/mug/mock/3mfk";
const DEFAULT_MOCK_PROTEIN_DIR: &str = "/home/user/bin/mug/mock/3mfk_monomers";
const DEFAULT_MOCKS_ENABLED: bool = true;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// External tool names, resolved through `PATH` when not absolute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSet {
    pub setup_script: String,
    pub pydock_bin: String,
    pub sampling_script: String,
    pub scoring_script: String,
}

impl Default for ToolSet {
    fn default() -> Self {
        Self {
            setup_script: DEFAULT_SETUP_SCRIPT.to_string(),
            pydock_bin: DEFAULT_PYDOCK_BIN.to_string(),
            sampling_script: DEFAULT_SAMPLING_SCRIPT.to_string(),
            scoring_script: DEFAULT_SCORING_SCRIPT.to_string(),
        }
    }
}

/// Host-level settings shared by every run
#[derive(Debug, Clone)]
pub struct DockflowConfig {
    pub tools: ToolSet,
    pub mock_dna_dir: PathBuf,
    pub mock_protein_dir: PathBuf,
    pub mocks_enabled: bool,
    pub concurrency: usize,
    pub top_copy_policy: TopCopyPolicy,
}

/// Number of processing units on this host
pub fn detect_cpu_count() -> usize {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    sys.cpus().len().max(1)
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Default for DockflowConfig {
    /// Loads from environment variables, falling back to defaults
    fn default() -> Self {
        let tools = ToolSet {
            setup_script: env_or("DOCKFLOW_SETUP_SCRIPT", DEFAULT_SETUP_SCRIPT),
            pydock_bin: env_or("DOCKFLOW_PYDOCK_BIN", DEFAULT_PYDOCK_BIN),
            sampling_script: env_or("DOCKFLOW_SAMPLING_SCRIPT", DEFAULT_SAMPLING_SCRIPT),
            scoring_script: env_or("DOCKFLOW_SCORING_SCRIPT", DEFAULT_SCORING_SCRIPT),
        };

        let mocks_enabled = env::var("DOCKFLOW_MOCKS_ENABLED")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_MOCKS_ENABLED);

        let concurrency = env::var("DOCKFLOW_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or_else(detect_cpu_count);

        let top_copy_policy = env::var("DOCKFLOW_TOP_COPY_POLICY")
            .ok()
            .and_then(|v| v.parse::<TopCopyPolicy>().ok())
            .unwrap_or_default();

        Self {
            tools,
            mock_dna_dir: PathBuf::from(env_or("DOCKFLOW_MOCK_DNA_DIR", DEFAULT_MOCK_DNA_DIR)),
            mock_protein_dir: PathBuf::from(env_or(
                "DOCKFLOW_MOCK_PROTEIN_DIR",
                DEFAULT_MOCK_PROTEIN_DIR,
            )),
            mocks_enabled,
            concurrency,
            top_copy_policy,
        }
    }
}

impl DockflowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tools = [
            ("setup script", &self.tools.setup_script),
            ("pydock binary", &self.tools.pydock_bin),
            ("sampling script", &self.tools.sampling_script),
            ("scoring script", &self.tools.scoring_script),
        ];
        for (label, value) in tools {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must not be empty",
                    label
                )));
            }
        }

        if self.concurrency == 0 {
            return Err(ConfigError::ValidationFailed(
                "Concurrency must be at least 1".to_string(),
            ));
        }

        if let Ok(raw) = env::var("DOCKFLOW_TOP_COPY_POLICY") {
            if let Err(error) = raw.parse::<TopCopyPolicy>() {
                return Err(ConfigError::ParseError {
                    field: "DOCKFLOW_TOP_COPY_POLICY".to_string(),
                    error,
                });
            }
        }

        Ok(())
    }
}
