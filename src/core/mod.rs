pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, GenerationConfig, ValidationConfig};
pub use error::{EngineError, Result};
pub use types::{GeneratedSequence, PuzzleCandidate};
