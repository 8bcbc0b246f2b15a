//! Core type definitions shared by the evaluator, validator and orchestrator

use crate::core::error::Result;
use crate::rules::{RuleKind, RuleParameters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A shown sequence together with its ground-truth continuation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSequence {
    pub sequence: Vec<i64>,
    /// Exactly what the evaluator produces for position `sequence.len() + 1`
    pub next_value: i64,
}

/// A complete puzzle as produced by one generation attempt
///
/// All sequences share one rule kind and one parameter set; only the
/// starting state differs. `answers[i]` is the continuation of
/// `sequences[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleCandidate {
    pub rule_kind: RuleKind,
    #[serde(default)]
    pub rule_parameters: RuleParameters,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub sequences: Vec<Vec<i64>>,
    pub answers: Vec<i64>,
    #[serde(default)]
    pub primary_index: usize,
    pub hints: Vec<String>,
    pub explanation: String,
}

impl PuzzleCandidate {
    /// Assemble a candidate from generated sequences
    pub fn from_generated(
        rule_kind: RuleKind,
        rule_parameters: RuleParameters,
        tags: BTreeSet<String>,
        generated: Vec<GeneratedSequence>,
        primary_index: usize,
        hints: Vec<String>,
        explanation: String,
    ) -> Self {
        let (sequences, answers) = generated
            .into_iter()
            .map(|g| (g.sequence, g.next_value))
            .unzip();

        Self {
            rule_kind,
            rule_parameters,
            tags,
            sequences,
            answers,
            primary_index,
            hints,
            explanation,
        }
    }

    /// Decode a stored puzzle
    ///
    /// A corrupted rule-kind token is reported as `UnknownRule` rather
    /// than a generic serialization error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(token) = value.get("ruleKind").and_then(|v| v.as_str()) {
            token.parse::<RuleKind>()?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The primary sequence and its answer, if the index is in range
    pub fn primary(&self) -> Option<(&[i64], i64)> {
        let sequence = self.sequences.get(self.primary_index)?;
        let answer = *self.answers.get(self.primary_index)?;
        Some((sequence.as_slice(), answer))
    }

    /// Every sequence/answer pair other than the primary one
    pub fn alternates(&self) -> impl Iterator<Item = (usize, &[i64], i64)> + '_ {
        self.sequences
            .iter()
            .zip(self.answers.iter())
            .enumerate()
            .filter(move |(idx, _)| *idx != self.primary_index)
            .map(|(idx, (sequence, answer))| (idx, sequence.as_slice(), *answer))
    }
}
