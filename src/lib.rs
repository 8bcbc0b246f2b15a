//! Sequence Engine - rule-based number sequence puzzles
//!
//! Evaluates a closed set of numeric rule programs, validates the puzzles
//! they produce for structure, difficulty and ambiguity, and drives a
//! bounded propose/validate loop with a deterministic fallback.

pub mod core;
pub mod generation;
pub mod llm;
pub mod rules;
pub mod validation;

pub use crate::core::{EngineConfig, EngineError, GeneratedSequence, PuzzleCandidate, Result};
pub use generation::{GenerationOutcome, Orchestrator, Proposal, ProposalRequest, ProposalSource};
pub use rules::{RuleKind, RuleParameters};
pub use validation::{PuzzleValidator, ValidationResult};
