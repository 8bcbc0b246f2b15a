//! Puzzle validation: structure, difficulty, and ambiguity

mod ambiguity;
mod composite;
mod difficulty;
pub mod patterns;
mod structural;

pub use ambiguity::AmbiguityValidator;
pub use composite::PuzzleValidator;
pub use difficulty::DifficultyValidator;
pub use structural::StructuralValidator;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Rule-agnostic pattern detectors used as rival hypotheses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RivalMethod {
    QuadraticFit,
    ConstantDifference,
    ConstantRatio,
    AlternatingDifference,
}

impl RivalMethod {
    pub const ALL: [RivalMethod; 4] = [
        RivalMethod::QuadraticFit,
        RivalMethod::ConstantDifference,
        RivalMethod::ConstantRatio,
        RivalMethod::AlternatingDifference,
    ];
}

impl fmt::Display for RivalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RivalMethod::QuadraticFit => "quadratic fit",
            RivalMethod::ConstantDifference => "constant difference",
            RivalMethod::ConstantRatio => "constant ratio",
            RivalMethod::AlternatingDifference => "alternating difference",
        };
        f.write_str(name)
    }
}

/// A single problem found in a puzzle
///
/// Whether an issue is an error or a warning is decided by the list it is
/// placed in, not by the variant.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("Puzzle has no sequences")]
    NoSequences,

    #[error("Sequence {index} has {len} terms, minimum is {minimum}")]
    SequenceTooShort { index: usize, len: usize, minimum: usize },

    #[error("Sequence {index} term {position} is {value}, outside [{min}, {max}]")]
    TermOutOfRange {
        index: usize,
        position: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Answer {index} is {value}, outside [{min}, {max}]")]
    AnswerOutOfRange { index: usize, value: i64, min: i64, max: i64 },

    #[error("{answers} answers for {sequences} sequences")]
    AnswerCountMismatch { sequences: usize, answers: usize },

    #[error("Puzzle has {count} hints, expected exactly {required}")]
    HintCount { count: usize, required: usize },

    #[error("Explanation has {chars} characters, minimum is {minimum}")]
    ExplanationTooShort { chars: usize, minimum: usize },

    #[error("Primary index {index} is out of range for {sequences} sequences")]
    PrimaryIndexOutOfRange { index: usize, sequences: usize },

    #[error("Answer {index} is {stated} but the rule continues with {expected}")]
    AnswerMismatch { index: usize, stated: i64, expected: i64 },

    #[error("Too easy: constant difference of {difference} gives the answer")]
    ConstantDifferenceTooEasy { difference: i64 },

    #[error("Too easy: constant ratio of {ratio} gives the answer")]
    ConstantRatioTooEasy { ratio: i64 },

    #[error("Ambiguous: {method} predicts {predicted} instead of {stated} and explains every sequence")]
    Ambiguous {
        method: RivalMethod,
        predicted: i64,
        stated: i64,
    },

    #[error("{method} predicts {predicted} instead of {stated}, ruled out by sequence {ruled_out_by}")]
    RivalRuledOut {
        method: RivalMethod,
        predicted: i64,
        stated: i64,
        ruled_out_by: usize,
    },
}

/// Outcome of validating one puzzle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_errors(&mut self, errors: Vec<ValidationIssue>) {
        if !errors.is_empty() {
            self.valid = false;
            self.errors.extend(errors);
        }
    }

    pub fn add_warnings(&mut self, warnings: Vec<ValidationIssue>) {
        self.warnings.extend(warnings);
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_never_invalidate() {
        let mut result = ValidationResult::new();
        result.add_warnings(vec![ValidationIssue::ConstantRatioTooEasy { ratio: 2 }]);
        assert!(result.valid);
        result.add_errors(Vec::new());
        assert!(result.valid);
        result.add_errors(vec![ValidationIssue::NoSequences]);
        assert!(!result.valid);
    }

    #[test]
    fn test_messages_are_readable() {
        let issue = ValidationIssue::Ambiguous {
            method: RivalMethod::ConstantDifference,
            predicted: 16,
            stated: 20,
        };
        assert_eq!(
            issue.to_string(),
            "Ambiguous: constant difference predicts 16 instead of 20 and explains every sequence"
        );
    }

    #[test]
    fn test_issue_serialization_is_tagged() {
        let json = serde_json::to_string(&ValidationIssue::HintCount { count: 1, required: 2 }).unwrap();
        assert_eq!(json, r#"{"issue":"hint_count","count":1,"required":2}"#);
    }
}
