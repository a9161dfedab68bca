use super::JobError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One catalog record; fields other than `_id` and `file_path` are kept as-is
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata records indexed by `_id`
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    entries: HashMap<String, MetadataEntry>,
}

impl MetadataCatalog {
    pub fn from_file(path: &Path) -> Result<Self, JobError> {
        let raw = std::fs::read_to_string(path).map_err(|source| JobError::Read {
            kind: "metadata",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| JobError::Parse {
            kind: "metadata",
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<MetadataEntry> = serde_json::from_str(raw)?;
        Ok(Self::from_entries(records))
    }

    /// Later records with a repeated `_id` replace earlier ones
    pub fn from_entries(records: impl IntoIterator<Item = MetadataEntry>) -> Self {
        let entries = records
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&MetadataEntry> {
        self.entries.get(id)
    }

    pub fn file_path(&self, id: &str) -> Result<PathBuf, JobError> {
        let entry = self
            .get(id)
            .ok_or_else(|| JobError::UnknownId(id.to_string()))?;
        entry
            .file_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| JobError::MissingFilePath(id.to_string()))
    }
}
