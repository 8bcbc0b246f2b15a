//! Proposal contract between the engine and whatever suggests rules
//!
//! A proposal source (an LLM, a hand-written file, a test closure) picks the
//! rule kind and parameters. The engine never decides which rule to try.

use crate::core::error::{EngineError, Result};
use crate::rules::{RuleKind, RuleParameters};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;

/// A rule suggestion plus the narrative text shown with the puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub rule_kind: RuleKind,
    #[serde(default)]
    pub parameters: RuleParameters,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_starting_value_sets: Option<Vec<Vec<i64>>>,
}

/// What the orchestrator tells a source about the attempt it is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRequest {
    /// Calendar date the puzzle is for
    pub date: String,
    /// 1-based attempt number
    pub attempt: u32,
    /// Why the previous attempt was rejected, if it was
    pub feedback: Vec<String>,
}

/// Anything that can propose a rule for a puzzle
///
/// Failures are retryable: they count against the attempt budget like a
/// validation failure. Only `EngineError::UnknownRule` aborts generation.
pub trait ProposalSource {
    fn propose(&mut self, request: &ProposalRequest) -> Result<Proposal>;
}

impl<F> ProposalSource for F
where
    F: FnMut(&ProposalRequest) -> Result<Proposal>,
{
    fn propose(&mut self, request: &ProposalRequest) -> Result<Proposal> {
        self(request)
    }
}

/// Replays a fixed queue of proposals and failures
///
/// Used for manually authored proposals and in tests. Once the queue is
/// empty every request fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProposalSource {
    queue: VecDeque<std::result::Result<Proposal, String>>,
}

impl ScriptedProposalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_proposals(proposals: Vec<Proposal>) -> Self {
        Self {
            queue: proposals.into_iter().map(Ok).collect(),
        }
    }

    /// Load a JSON array of proposals
    ///
    /// An unrecognized rule token is reported as `UnknownRule`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(entries) = value.as_array() {
            for token in entries
                .iter()
                .filter_map(|entry| entry.get("ruleKind").and_then(|v| v.as_str()))
            {
                token.parse::<RuleKind>()?;
            }
        }
        let proposals: Vec<Proposal> = serde_json::from_value(value)?;
        Ok(Self::from_proposals(proposals))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_proposal(mut self, proposal: Proposal) -> Self {
        self.queue.push_back(Ok(proposal));
        self
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.queue.push_back(Err(message.into()));
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ProposalSource for ScriptedProposalSource {
    fn propose(&mut self, _request: &ProposalRequest) -> Result<Proposal> {
        match self.queue.pop_front() {
            Some(Ok(proposal)) => Ok(proposal),
            Some(Err(message)) => Err(EngineError::Proposal(message)),
            None => Err(EngineError::Proposal("No scripted proposals left".into())),
        }
    }
}
