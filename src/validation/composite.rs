//! Composite validator that runs the full pipeline

use super::{
    AmbiguityValidator, DifficultyValidator, StructuralValidator, ValidationIssue,
    ValidationResult,
};
use crate::core::config::ValidationConfig;
use crate::core::types::PuzzleCandidate;
use crate::rules::{next_term, varied_parameters};

/// Runs structural, difficulty and ambiguity checks in order
///
/// Difficulty and ambiguity only run on structurally sound puzzles.
#[derive(Debug, Clone, Default)]
pub struct PuzzleValidator {
    config: ValidationConfig,
}

impl PuzzleValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, candidate: &PuzzleCandidate) -> ValidationResult {
        self.run(candidate, false)
    }

    /// Validate a stored puzzle, also checking every answer against its rule
    pub fn revalidate(&self, candidate: &PuzzleCandidate) -> ValidationResult {
        self.run(candidate, true)
    }

    fn run(&self, candidate: &PuzzleCandidate, check_answers: bool) -> ValidationResult {
        let mut result = ValidationResult::new();

        let structural = StructuralValidator::validate(candidate, &self.config);
        if !structural.is_empty() {
            tracing::debug!(errors = structural.len(), "structural check failed");
            result.add_errors(structural);
            return result;
        }

        if check_answers {
            result.add_errors(Self::answer_mismatches(candidate));
        }

        result.add_warnings(DifficultyValidator::validate(candidate, &self.config));

        let ambiguity = AmbiguityValidator::validate(candidate, &self.config);
        result.add_errors(ambiguity.errors);
        result.add_warnings(ambiguity.warnings);

        tracing::debug!(
            rule = %candidate.rule_kind,
            valid = result.valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated puzzle"
        );
        result
    }

    /// Positional sequences are checked against the parameters their
    /// index was generated with.
    fn answer_mismatches(candidate: &PuzzleCandidate) -> Vec<ValidationIssue> {
        candidate
            .sequences
            .iter()
            .zip(candidate.answers.iter())
            .enumerate()
            .filter_map(|(index, (sequence, &stated))| {
                let expected = next_term(
                    sequence,
                    candidate.rule_kind,
                    &varied_parameters(candidate.rule_kind, &candidate.rule_parameters, index),
                    sequence.len() + 1,
                );
                (expected != stated).then_some(ValidationIssue::AnswerMismatch {
                    index,
                    stated,
                    expected,
                })
            })
            .collect()
    }
}
