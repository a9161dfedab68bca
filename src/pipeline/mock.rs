//! Fixture substitution for the sampling and scoring stages
//!
//! Known benchmark input pairs have pre-computed sampling and scoring outputs
//! on the docking host. When a run's inputs match one of them, the stages copy
//! those fixtures instead of running the expensive tools. The artifacts each
//! stage must produce stay the same in both modes.

use crate::config::DockflowConfig;
use std::path::{Path, PathBuf};

pub const FIXTURE_STEM: &str = "3mfk";

/// A fixture set and the input pairs it stands in for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProfile {
    pub name: String,
    pub receptor_file: String,
    pub ligand_file: String,
    /// Also match with receptor and ligand swapped
    pub symmetric: bool,
    pub fixture_dir: PathBuf,
    pub fixture_stem: String,
}

impl MockProfile {
    pub fn matches(&self, receptor: &str, ligand: &str) -> bool {
        (receptor == self.receptor_file && ligand == self.ligand_file)
            || (self.symmetric && receptor == self.ligand_file && ligand == self.receptor_file)
    }

    /// Protein-DNA complex, receptor/ligand orientation fixed
    pub fn protein_dna(fixture_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: "protein-dna".to_string(),
            receptor_file: "3mfk_homodimer.pdb".to_string(),
            ligand_file: "3mfk_dna.pdb".to_string(),
            symmetric: false,
            fixture_dir: fixture_dir.into(),
            fixture_stem: FIXTURE_STEM.to_string(),
        }
    }

    /// Protein-protein monomers, either orientation
    pub fn protein_protein(fixture_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: "protein-protein".to_string(),
            receptor_file: "3mfk_monomer2.pdb".to_string(),
            ligand_file: "3mfk_monomer1.pdb".to_string(),
            symmetric: true,
            fixture_dir: fixture_dir.into(),
            fixture_stem: FIXTURE_STEM.to_string(),
        }
    }
}

/// How sampling and scoring artifacts get produced for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockMode {
    Real,
    Fixture(MockProfile),
}

impl MockMode {
    pub fn is_mocked(&self) -> bool {
        matches!(self, MockMode::Fixture(_))
    }

    pub fn fixture_dir(&self) -> Option<&Path> {
        match self {
            MockMode::Real => None,
            MockMode::Fixture(profile) => Some(&profile.fixture_dir),
        }
    }

    /// `<fixture_dir>/<stem>.<extension>` in fixture mode
    pub fn fixture_file(&self, extension: &str) -> Option<PathBuf> {
        match self {
            MockMode::Real => None,
            MockMode::Fixture(profile) => Some(
                profile
                    .fixture_dir
                    .join(format!("{}.{}", profile.fixture_stem, extension)),
            ),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MockMode::Real => "real",
            MockMode::Fixture(profile) => &profile.name,
        }
    }
}

/// Ordered profile list; the first matching profile wins
#[derive(Debug, Clone, Default)]
pub struct MockSelector {
    profiles: Vec<MockProfile>,
}

impl MockSelector {
    pub fn new(profiles: Vec<MockProfile>) -> Self {
        Self { profiles }
    }

    /// Never substitutes
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn builtin(dna_dir: impl Into<PathBuf>, protein_dir: impl Into<PathBuf>) -> Self {
        Self::new(vec![
            MockProfile::protein_dna(dna_dir),
            MockProfile::protein_protein(protein_dir),
        ])
    }

    pub fn from_config(config: &DockflowConfig) -> Self {
        if config.mocks_enabled {
            Self::builtin(&config.mock_dna_dir, &config.mock_protein_dir)
        } else {
            Self::disabled()
        }
    }

    pub fn profiles(&self) -> &[MockProfile] {
        &self.profiles
    }

    pub fn select(&self, receptor_file: &str, ligand_file: &str) -> MockMode {
        self.profiles
            .iter()
            .find(|profile| profile.matches(receptor_file, ligand_file))
            .cloned()
            .map_or(MockMode::Real, MockMode::Fixture)
    }
}
