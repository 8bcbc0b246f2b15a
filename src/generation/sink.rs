//! Where accepted puzzles go
//!
//! The engine never stores anything itself; callers hand each outcome to
//! a sink of their choosing.

use crate::core::error::Result;
use crate::generation::orchestrator::GenerationOutcome;
use std::path::{Path, PathBuf};

pub trait PuzzleSink {
    fn store(&mut self, date: &str, outcome: &GenerationOutcome) -> Result<()>;
}

/// Writes one pretty-printed JSON file per date: `<dir>/<date>.json`
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    dir: PathBuf,
}

impl JsonDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, date: &str) -> PathBuf {
        self.dir.join(format!("{}.json", date))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PuzzleSink for JsonDirectorySink {
    fn store(&mut self, date: &str, outcome: &GenerationOutcome) -> Result<()> {
        let path = self.path_for(date);
        let json = serde_json::to_string_pretty(outcome)?;
        std::fs::write(&path, json)?;
        tracing::debug!(date, path = %path.display(), "stored puzzle");
        Ok(())
    }
}
