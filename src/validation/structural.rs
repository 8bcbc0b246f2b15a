//! Structural validation: counts, lengths, and value ranges

use super::ValidationIssue;
use crate::core::config::ValidationConfig;
use crate::core::types::PuzzleCandidate;

pub struct StructuralValidator;

impl StructuralValidator {
    /// Collect every structural violation; nothing short-circuits
    pub fn validate(candidate: &PuzzleCandidate, config: &ValidationConfig) -> Vec<ValidationIssue> {
        let mut errors = Vec::new();

        if candidate.sequences.is_empty() {
            errors.push(ValidationIssue::NoSequences);
        }

        for (index, sequence) in candidate.sequences.iter().enumerate() {
            if sequence.len() < config.min_sequence_length {
                errors.push(ValidationIssue::SequenceTooShort {
                    index,
                    len: sequence.len(),
                    minimum: config.min_sequence_length,
                });
            }
            errors.extend(Self::validate_terms(index, sequence, config));
        }

        for (index, &value) in candidate.answers.iter().enumerate() {
            if !Self::in_range(value, config) {
                errors.push(ValidationIssue::AnswerOutOfRange {
                    index,
                    value,
                    min: config.min_value,
                    max: config.max_value,
                });
            }
        }

        if candidate.answers.len() != candidate.sequences.len() {
            errors.push(ValidationIssue::AnswerCountMismatch {
                sequences: candidate.sequences.len(),
                answers: candidate.answers.len(),
            });
        }

        if !candidate.sequences.is_empty() && candidate.primary_index >= candidate.sequences.len() {
            errors.push(ValidationIssue::PrimaryIndexOutOfRange {
                index: candidate.primary_index,
                sequences: candidate.sequences.len(),
            });
        }

        if candidate.hints.len() != config.required_hints {
            errors.push(ValidationIssue::HintCount {
                count: candidate.hints.len(),
                required: config.required_hints,
            });
        }

        let chars = candidate.explanation.trim().chars().count();
        if chars < config.min_explanation_chars {
            errors.push(ValidationIssue::ExplanationTooShort {
                chars,
                minimum: config.min_explanation_chars,
            });
        }

        errors
    }

    fn validate_terms(
        index: usize,
        sequence: &[i64],
        config: &ValidationConfig,
    ) -> Vec<ValidationIssue> {
        sequence
            .iter()
            .enumerate()
            .filter(|(_, value)| !Self::in_range(**value, config))
            .map(|(i, &value)| ValidationIssue::TermOutOfRange {
                index,
                position: i + 1,
                value,
                min: config.min_value,
                max: config.max_value,
            })
            .collect()
    }

    fn in_range(value: i64, config: &ValidationConfig) -> bool {
        value >= config.min_value && value <= config.max_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleKind, RuleParameters};

    fn puzzle(sequences: Vec<Vec<i64>>, answers: Vec<i64>) -> PuzzleCandidate {
        PuzzleCandidate {
            rule_kind: RuleKind::Arithmetic,
            rule_parameters: RuleParameters::default(),
            tags: Default::default(),
            sequences,
            answers,
            primary_index: 0,
            hints: vec!["Look at the gaps".into(), "They never change".into()],
            explanation: "Each term adds three.".into(),
        }
    }

    #[test]
    fn test_well_formed_puzzle_passes() {
        let p = puzzle(vec![vec![1, 4, 7, 10], vec![2, 5, 8, 11]], vec![13, 14]);
        assert!(StructuralValidator::validate(&p, &ValidationConfig::default()).is_empty());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut p = puzzle(vec![vec![1, 4, 7]], vec![10, 13]);
        p.hints.pop();
        p.explanation = "short".into();
        let errors = StructuralValidator::validate(&p, &ValidationConfig::default());
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationIssue::SequenceTooShort { len: 3, .. }));
        assert!(errors.contains(&ValidationIssue::AnswerCountMismatch { sequences: 1, answers: 2 }));
        assert!(errors.contains(&ValidationIssue::HintCount { count: 1, required: 2 }));
        assert!(errors.contains(&ValidationIssue::ExplanationTooShort { chars: 5, minimum: 10 }));
    }

    #[test]
    fn test_value_range() {
        let p = puzzle(vec![vec![1, 10, 100, 1000]], vec![-1000]);
        let errors = StructuralValidator::validate(&p, &ValidationConfig::default());
        assert_eq!(
            errors,
            vec![
                ValidationIssue::TermOutOfRange {
                    index: 0,
                    position: 4,
                    value: 1000,
                    min: -999,
                    max: 999
                },
                ValidationIssue::AnswerOutOfRange {
                    index: 0,
                    value: -1000,
                    min: -999,
                    max: 999
                },
            ]
        );

        let edge = puzzle(vec![vec![-999, 0, 999, 0]], vec![999]);
        assert!(StructuralValidator::validate(&edge, &ValidationConfig::default()).is_empty());
    }

    #[test]
    fn test_no_sequences() {
        let p = puzzle(Vec::new(), Vec::new());
        let errors = StructuralValidator::validate(&p, &ValidationConfig::default());
        assert_eq!(errors, vec![ValidationIssue::NoSequences]);
    }

    #[test]
    fn test_primary_index_out_of_range() {
        let mut p = puzzle(vec![vec![1, 2, 3, 4]], vec![5]);
        p.primary_index = 1;
        let errors = StructuralValidator::validate(&p, &ValidationConfig::default());
        assert_eq!(
            errors,
            vec![ValidationIssue::PrimaryIndexOutOfRange { index: 1, sequences: 1 }]
        );
    }
}
