//! Difficulty signals: puzzles a glance at the gaps would solve

use super::patterns::{detect_constant_difference, detect_constant_ratio};
use super::ValidationIssue;
use crate::core::config::ValidationConfig;
use crate::core::types::PuzzleCandidate;

pub struct DifficultyValidator;

impl DifficultyValidator {
    /// Warnings only; looks at the primary sequence alone
    pub fn validate(candidate: &PuzzleCandidate, config: &ValidationConfig) -> Vec<ValidationIssue> {
        let mut warnings = Vec::new();
        let Some((sequence, answer)) = candidate.primary() else {
            return warnings;
        };

        if let Some(found) = detect_constant_difference(sequence) {
            if found.next_value == answer {
                warnings.push(ValidationIssue::ConstantDifferenceTooEasy {
                    difference: found.difference,
                });
            }
        }

        if let Some(found) = detect_constant_ratio(sequence, config.ratio_tolerance) {
            if found.next_value == answer {
                warnings.push(ValidationIssue::ConstantRatioTooEasy { ratio: found.ratio });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleKind, RuleParameters};

    fn primary_only(sequence: Vec<i64>, answer: i64) -> PuzzleCandidate {
        PuzzleCandidate {
            rule_kind: RuleKind::Arithmetic,
            rule_parameters: RuleParameters::default(),
            tags: Default::default(),
            sequences: vec![sequence],
            answers: vec![answer],
            primary_index: 0,
            hints: vec!["one".into(), "two".into()],
            explanation: "A fixed step each time".into(),
        }
    }

    #[test]
    fn test_constant_difference_is_flagged() {
        let warnings = DifficultyValidator::validate(
            &primary_only(vec![1, 4, 7, 10, 13], 16),
            &ValidationConfig::default(),
        );
        assert_eq!(
            warnings,
            vec![ValidationIssue::ConstantDifferenceTooEasy { difference: 3 }]
        );
    }

    #[test]
    fn test_constant_ratio_is_flagged() {
        let warnings = DifficultyValidator::validate(
            &primary_only(vec![2, 6, 18, 54], 162),
            &ValidationConfig::default(),
        );
        assert_eq!(warnings, vec![ValidationIssue::ConstantRatioTooEasy { ratio: 3 }]);
    }

    #[test]
    fn test_no_warning_when_pattern_disagrees_with_answer() {
        let warnings = DifficultyValidator::validate(
            &primary_only(vec![1, 4, 7, 10, 13], 20),
            &ValidationConfig::default(),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_no_warning_for_non_trivial_sequence() {
        let warnings = DifficultyValidator::validate(
            &primary_only(vec![1, 1, 2, 3, 5], 8),
            &ValidationConfig::default(),
        );
        assert!(warnings.is_empty());
    }
}
