//! LLM-backed proposal source

pub mod client;
pub mod context;
pub mod parser;

pub use client::{LlmClient, LlmSettings};
pub use context::ProposalContext;
pub use parser::{parse_proposal, request_proposal, LlmProposalSource};
