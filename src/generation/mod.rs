//! Puzzle generation: proposals, the retry loop, and fallbacks

pub mod fallback;
pub mod orchestrator;
pub mod proposal;
pub mod sink;

pub use fallback::FallbackCatalog;
pub use orchestrator::{seed_sets, GenerationOutcome, Orchestrator};
pub use proposal::{Proposal, ProposalRequest, ProposalSource, ScriptedProposalSource};
pub use sink::{JsonDirectorySink, PuzzleSink};
