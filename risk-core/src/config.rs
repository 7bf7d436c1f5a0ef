//! Artifact location configuration

use std::path::PathBuf;

use crate::constants;

/// Where trained artifacts are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    /// Searched first
    pub primary_dir: PathBuf,
    /// Used for all three artifacts when the primary dir has no classifier
    pub fallback_dir: PathBuf,
}

impl ArtifactConfig {
    pub fn new(primary_dir: impl Into<PathBuf>, fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            primary_dir: primary_dir.into(),
            fallback_dir: fallback_dir.into(),
        }
    }

    /// Single directory, no fallback
    pub fn single(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(dir.clone(), dir)
    }

    /// Load from `ARTIFACT_DIR` / `ARTIFACT_FALLBACK_DIR`
    pub fn from_env() -> Self {
        Self::new(constants::get_artifact_dir(), constants::get_fallback_dir())
    }

    /// Directories in search order, without duplicates
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.primary_dir.clone()];
        if self.fallback_dir != self.primary_dir {
            dirs.push(self.fallback_dir.clone());
        }
        dirs
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::new(constants::DEFAULT_ARTIFACT_DIR, constants::DEFAULT_FALLBACK_DIR)
    }
}
