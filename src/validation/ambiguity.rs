//! Ambiguity detection
//!
//! Each rival detector that confidently predicts something other than the
//! stated primary answer is re-run on every alternate sequence. A rival
//! that also explains every alternate is a second complete rule system for
//! the puzzle and makes it ambiguous (error). A rival that some alternate
//! contradicts has been ruled out by the extra sequences (warning).

use super::patterns::{
    detect_alternating_difference, detect_constant_difference, detect_constant_ratio,
    fit_quadratic,
};
use super::{RivalMethod, ValidationIssue};
use crate::core::config::ValidationConfig;
use crate::core::types::PuzzleCandidate;

/// Errors and warnings from one ambiguity pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbiguityReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

pub struct AmbiguityValidator;

impl AmbiguityValidator {
    pub fn validate(candidate: &PuzzleCandidate, config: &ValidationConfig) -> AmbiguityReport {
        let mut report = AmbiguityReport::default();
        let Some((primary, stated)) = candidate.primary() else {
            return report;
        };

        for method in RivalMethod::ALL {
            let Some(predicted) =
                Self::predict(method, primary, config.quadratic_confidence_threshold, config)
            else {
                continue;
            };
            if predicted == stated {
                continue;
            }

            let ruled_out_by = candidate.alternates().find_map(|(idx, sequence, answer)| {
                let alternate =
                    Self::predict(method, sequence, config.alternate_fit_threshold, config);
                (alternate != Some(answer)).then_some(idx)
            });

            match ruled_out_by {
                None => {
                    tracing::debug!(%method, predicted, stated, "rival explains every sequence");
                    report.errors.push(ValidationIssue::Ambiguous {
                        method,
                        predicted,
                        stated,
                    });
                }
                Some(ruled_out_by) => {
                    report.warnings.push(ValidationIssue::RivalRuledOut {
                        method,
                        predicted,
                        stated,
                        ruled_out_by,
                    });
                }
            }
        }

        report
    }

    /// Prediction of one rival detector, if it applies to the sequence
    ///
    /// The quadratic fit only counts when its mean error is under
    /// `fit_threshold`.
    fn predict(
        method: RivalMethod,
        sequence: &[i64],
        fit_threshold: f64,
        config: &ValidationConfig,
    ) -> Option<i64> {
        match method {
            RivalMethod::QuadraticFit => fit_quadratic(sequence, config.singular_determinant_epsilon)
                .filter(|fit| fit.mean_error < fit_threshold)
                .map(|fit| fit.next_value),
            RivalMethod::ConstantDifference => {
                detect_constant_difference(sequence).map(|found| found.next_value)
            }
            RivalMethod::ConstantRatio => {
                detect_constant_ratio(sequence, config.ratio_tolerance).map(|found| found.next_value)
            }
            RivalMethod::AlternatingDifference => {
                detect_alternating_difference(sequence).map(|found| found.next_value)
            }
        }
    }
}
