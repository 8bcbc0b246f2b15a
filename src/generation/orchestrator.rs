//! Propose, expand, validate: a bounded retry loop
//!
//! Each attempt is independent; the only state carried between attempts is
//! the attempt counter and the feedback for the next proposal. When the
//! attempt budget runs out the orchestrator returns the date's fallback
//! puzzle instead of failing.

use crate::core::config::{EngineConfig, GenerationConfig};
use crate::core::error::Result;
use crate::core::types::{GeneratedSequence, PuzzleCandidate};
use crate::generation::fallback::FallbackCatalog;
use crate::generation::proposal::{Proposal, ProposalRequest, ProposalSource};
use crate::rules::{generate_multiple_sequences, generate_sequence, spread_seed, RuleParameters};
use crate::validation::{PuzzleValidator, ValidationResult};
use serde::Serialize;

/// What generation produced for one date
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub date: String,
    pub puzzle: PuzzleCandidate,
    pub is_fallback: bool,
    /// Attempts spent, including failed proposals
    pub attempts: u32,
    pub validation: ValidationResult,
}

pub struct Orchestrator {
    config: GenerationConfig,
    validator: PuzzleValidator,
    catalog: FallbackCatalog,
}

impl Orchestrator {
    /// Create an orchestrator with the built-in fallback catalog
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_catalog(config, FallbackCatalog::builtin()?)
    }

    pub fn with_catalog(config: EngineConfig, catalog: FallbackCatalog) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.generation,
            validator: PuzzleValidator::new(config.validation),
            catalog,
        })
    }

    pub fn validator(&self) -> &PuzzleValidator {
        &self.validator
    }

    /// Generate the puzzle for `date`
    ///
    /// Never fails for proposal or validation problems; after
    /// `max_attempts` the fallback puzzle is returned. Only a
    /// non-retryable error from the source (an unknown rule kind) is
    /// propagated.
    pub fn generate<S>(&self, source: &mut S, date: &str) -> Result<GenerationOutcome>
    where
        S: ProposalSource + ?Sized,
    {
        let mut feedback = Vec::new();

        for attempt in 1..=self.config.max_attempts {
            let request = ProposalRequest {
                date: date.to_string(),
                attempt,
                feedback: std::mem::take(&mut feedback),
            };

            let proposal = match source.propose(&request) {
                Ok(proposal) => proposal,
                Err(e) if e.is_retryable() => {
                    tracing::warn!(date, attempt, error = %e, "proposal failed");
                    feedback.push(e.to_string());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let puzzle = self.expand(proposal);
            let validation = self.validator.validate(&puzzle);
            if validation.valid {
                tracing::info!(
                    date,
                    attempt,
                    rule = %puzzle.rule_kind,
                    warnings = validation.warnings.len(),
                    "accepted puzzle"
                );
                return Ok(GenerationOutcome {
                    date: date.to_string(),
                    puzzle,
                    is_fallback: false,
                    attempts: attempt,
                    validation,
                });
            }

            let errors = validation.error_messages();
            tracing::warn!(date, attempt, rule = %puzzle.rule_kind, ?errors, "puzzle rejected");
            feedback = errors;
        }

        Ok(self.fallback(date))
    }

    /// Turn a proposal into a concrete puzzle
    pub fn expand(&self, proposal: Proposal) -> PuzzleCandidate {
        let kind = proposal.rule_kind;
        let count = self.config.sequence_count;
        let length = self.config.sequence_length;

        let generated: Vec<GeneratedSequence> = if kind.requires_starting_values() {
            seed_sets(
                &proposal.parameters,
                proposal.suggested_starting_value_sets.as_deref(),
                count,
            )
            .iter()
            .map(|seed| generate_sequence(kind, &proposal.parameters, length, Some(seed)))
            .collect()
        } else {
            generate_multiple_sequences(kind, &proposal.parameters, count, length)
        };

        PuzzleCandidate::from_generated(
            kind,
            proposal.parameters,
            proposal.tags,
            generated,
            self.config.primary_index,
            proposal.hints,
            proposal.explanation,
        )
    }

    /// The fallback outcome for `date`
    pub fn fallback(&self, date: &str) -> GenerationOutcome {
        let puzzle = self.catalog.select(date).clone();
        let validation = self.validator.validate(&puzzle);
        if !validation.valid {
            tracing::warn!(date, errors = ?validation.error_messages(), "fallback puzzle fails validation");
        }
        tracing::info!(
            date,
            attempts = self.config.max_attempts,
            index = self.catalog.index_for(date),
            "attempts exhausted, using fallback puzzle"
        );

        GenerationOutcome {
            date: date.to_string(),
            puzzle,
            is_fallback: true,
            attempts: self.config.max_attempts,
            validation,
        }
    }
}

/// Exactly `count` seed sets for a seeded rule
///
/// Suggested sets are used first, in order. Missing sets are derived from
/// the base seed with [`spread_seed`]. The base is the parameters'
/// `startingValues`, else the first suggestion, else `[1]`.
pub fn seed_sets(
    params: &RuleParameters,
    suggested: Option<&[Vec<i64>]>,
    count: usize,
) -> Vec<Vec<i64>> {
    let mut sets: Vec<Vec<i64>> = suggested
        .unwrap_or_default()
        .iter()
        .filter(|set| !set.is_empty())
        .take(count)
        .cloned()
        .collect();

    let base = match &params.starting_values {
        Some(values) if !values.is_empty() => values.clone(),
        _ => sets.first().cloned().unwrap_or_else(|| params.seed()),
    };

    for i in sets.len()..count {
        sets.push(spread_seed(&base, i));
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;
    use crate::generation::proposal::ScriptedProposalSource;
    use crate::rules::RuleKind;

    fn proposal(kind: RuleKind, params: RuleParameters) -> Proposal {
        Proposal {
            rule_kind: kind,
            parameters: params,
            tags: ["test".to_string()].into_iter().collect(),
            hints: vec!["First hint".into(), "Second hint".into()],
            explanation: "A perfectly reasonable explanation.".into(),
            suggested_starting_value_sets: None,
        }
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_seed_sets_pad_with_spread() {
        let params = RuleParameters {
            starting_values: Some(vec![1, 1]),
            ..Default::default()
        };
        assert_eq!(
            seed_sets(&params, None, 3),
            vec![vec![1, 1], vec![3, 5], vec![5, 9]]
        );

        let suggested = vec![vec![2, 3], vec![]];
        assert_eq!(
            seed_sets(&RuleParameters::default(), Some(suggested.as_slice()), 3),
            vec![vec![2, 3], vec![4, 7], vec![6, 11]]
        );

        let many = vec![vec![1], vec![2], vec![3], vec![4]];
        assert_eq!(seed_sets(&params, Some(many.as_slice()), 2), vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_expand_seeded_rule_uses_suggestions() {
        let mut p = proposal(RuleKind::FibonacciLike, RuleParameters::default());
        p.suggested_starting_value_sets = Some(vec![vec![1, 1], vec![2, 5]]);
        let puzzle = orchestrator().expand(p);
        assert_eq!(puzzle.sequences.len(), 3);
        assert_eq!(puzzle.sequences[0], vec![1, 1, 2, 3, 5]);
        assert_eq!(puzzle.sequences[1], vec![2, 5, 7, 12, 19]);
        // third set derived from the first suggestion: [1+4, 1+8]
        assert_eq!(puzzle.sequences[2], vec![5, 9, 14, 23, 37]);
        assert_eq!(puzzle.answers, vec![8, 31, 60]);
    }

    #[test]
    fn test_expand_positional_rule() {
        let puzzle = orchestrator().expand(proposal(
            RuleKind::QuadraticPositional,
            RuleParameters::default(),
        ));
        assert_eq!(puzzle.sequences[1], vec![4, 7, 12, 19, 28]);
        assert_eq!(puzzle.answers, vec![36, 39, 42]);
    }

    #[test]
    fn test_valid_first_proposal_is_accepted() {
        let mut source = ScriptedProposalSource::from_proposals(vec![proposal(
            RuleKind::QuadraticPositional,
            RuleParameters::default(),
        )]);
        let outcome = orchestrator().generate(&mut source, "2024-01-01").unwrap();
        assert!(!outcome.is_fallback);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.validation.valid);
    }

    #[test]
    fn test_retries_after_failures() {
        let mut bad = proposal(RuleKind::QuadraticPositional, RuleParameters::default());
        bad.hints.clear();
        let mut source = ScriptedProposalSource::new()
            .with_failure("connection reset")
            .with_proposal(bad)
            .with_proposal(proposal(RuleKind::QuadraticPositional, RuleParameters::default()));

        let outcome = orchestrator().generate(&mut source, "2024-01-01").unwrap();
        assert!(!outcome.is_fallback);
        assert_eq!(outcome.attempts, 3);
    }

    #[test]
    fn test_feedback_reaches_next_request() {
        let mut seen = Vec::new();
        let mut source = |req: &ProposalRequest| -> Result<Proposal> {
            seen.push(req.feedback.clone());
            let mut p = proposal(RuleKind::QuadraticPositional, RuleParameters::default());
            if req.attempt == 1 {
                p.explanation = "short".into();
            }
            Ok(p)
        };
        let outcome = orchestrator().generate(&mut source, "2024-01-01").unwrap();
        assert_eq!(outcome.attempts, 2);
        assert!(seen[0].is_empty());
        assert!(seen[1][0].contains("Explanation"));
    }

    #[test]
    fn test_exhausted_attempts_fall_back() {
        let mut calls = 0u32;
        let mut source = |_: &ProposalRequest| -> Result<Proposal> {
            calls += 1;
            Err(EngineError::Proposal("unparsable".into()))
        };
        let outcome = orchestrator().generate(&mut source, "2024-02-02").unwrap();
        assert!(outcome.is_fallback);
        assert_eq!(outcome.attempts, 20);
        assert_eq!(calls, 20);
    }

    #[test]
    fn test_unknown_rule_propagates() {
        let mut source = |_: &ProposalRequest| -> Result<Proposal> {
            Err(EngineError::UnknownRule("spiral".into()))
        };
        let result = orchestrator().generate(&mut source, "2024-02-02");
        assert!(matches!(result, Err(EngineError::UnknownRule(_))));
    }

    #[test]
    fn test_extreme_seed_falls_back_instead_of_panicking() {
        let huge = RuleParameters {
            starting_values: Some(vec![i64::MAX]),
            ..Default::default()
        };
        let mut source =
            |_: &ProposalRequest| -> Result<Proposal> { Ok(proposal(RuleKind::Arithmetic, huge.clone())) };
        let outcome = orchestrator().generate(&mut source, "2024-02-02").unwrap();
        assert!(outcome.is_fallback);
        assert_eq!(outcome.attempts, 20);

        let mut huge_constant = |_: &ProposalRequest| -> Result<Proposal> {
            Ok(proposal(
                RuleKind::QuadraticPositional,
                RuleParameters {
                    c: Some(i64::MAX - 1),
                    ..Default::default()
                },
            ))
        };
        let outcome = orchestrator().generate(&mut huge_constant, "2024-02-02").unwrap();
        assert!(outcome.is_fallback);
    }
}
