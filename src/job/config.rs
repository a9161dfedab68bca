use super::JobError;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};

/// The job configuration document
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub input_files: Vec<JobArgument>,
    #[serde(default)]
    pub arguments: Vec<JobArgument>,
}

/// A `{name, value}` pair, used for both inputs and arguments
#[derive(Debug, Clone, Deserialize)]
pub struct JobArgument {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl JobArgument {
    /// String values verbatim, numbers and booleans rendered as text
    fn text(&self) -> Option<String> {
        match &self.value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl JobConfig {
    pub fn from_file(path: &Path) -> Result<Self, JobError> {
        let raw = std::fs::read_to_string(path).map_err(|source| JobError::Read {
            kind: "config",
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| JobError::Parse {
            kind: "config",
            path: path.to_path_buf(),
            source,
        })
    }

    /// `(receptor_id, ligand_id)`: the entry named `ligand` is the ligand,
    /// the other one is the receptor
    pub fn molecule_ids(&self) -> Result<(String, String), JobError> {
        let [first, second] = self.input_files.as_slice() else {
            return Err(JobError::InputFileCount(self.input_files.len()));
        };

        let (ligand, receptor) = if first.name == "ligand" {
            (first, second)
        } else {
            (second, first)
        };

        let id = |input: &JobArgument| {
            input
                .text()
                .ok_or_else(|| JobError::MissingInputValue(input.name.clone()))
        };

        Ok((id(receptor)?, id(ligand)?))
    }

    fn argument(&self, name: &'static str) -> Result<String, JobError> {
        self.arguments
            .iter()
            .rev()
            .find(|arg| arg.name == name)
            .and_then(JobArgument::text)
            .ok_or(JobError::MissingArgument(name))
    }

    /// The `execution` argument made absolute against the current directory
    pub fn project_path(&self) -> Result<PathBuf, JobError> {
        let path = PathBuf::from(self.argument("execution")?);
        if path.is_absolute() {
            return Ok(path);
        }
        let cwd = env::current_dir().map_err(|_| JobError::InvalidArgument {
            name: "execution",
            value: path.display().to_string(),
        })?;
        Ok(cwd.join(path))
    }

    pub fn num_models(&self) -> Result<u32, JobError> {
        let raw = self.argument("models")?;
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(JobError::InvalidArgument {
                name: "models",
                value: raw,
            }),
        }
    }

    pub fn scoring_function(&self) -> Result<String, JobError> {
        self.argument("scoring")
    }
}
