//! Deterministic fallback puzzles
//!
//! When every attempt fails, the puzzle for a date comes from a small
//! hand-authored catalog. Selection depends only on the date string.

use crate::core::calendar::date_index;
use crate::core::error::{EngineError, Result};
use crate::core::types::PuzzleCandidate;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/fallback_catalog.toml");

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(rename = "puzzle", default)]
    puzzles: Vec<PuzzleCandidate>,
}

/// A non-empty list of fallback puzzles
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    puzzles: Vec<PuzzleCandidate>,
}

impl FallbackCatalog {
    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.puzzles)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn new(puzzles: Vec<PuzzleCandidate>) -> Result<Self> {
        if puzzles.is_empty() {
            return Err(EngineError::Catalog("Fallback catalog is empty".into()));
        }
        Ok(Self { puzzles })
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn puzzles(&self) -> &[PuzzleCandidate] {
        &self.puzzles
    }

    /// Index of the entry used for `date`
    pub fn index_for(&self, date: &str) -> usize {
        date_index(date, self.puzzles.len())
    }

    /// The entry used for `date`; the same date always gets the same entry
    pub fn select(&self, date: &str) -> &PuzzleCandidate {
        &self.puzzles[self.index_for(date)]
    }
}
