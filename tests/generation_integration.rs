//! Orchestrator integration tests: retries, fallback, backfill

use rayon::prelude::*;
use sequence_engine::core::calendar::date_range;
use sequence_engine::core::EngineError;
use sequence_engine::generation::*;
use sequence_engine::{EngineConfig, Result};

const QUADRATIC_PROPOSALS: &str = r#"[
  {
    "ruleKind": "quadratic_positional",
    "parameters": {"a": 1, "b": 0, "c": 0},
    "tags": ["squares"],
    "hints": ["Think about position", "Squares"],
    "explanation": "Each term is its position squared plus a constant."
  }
]"#;

fn always_invalid(_: &ProposalRequest) -> Result<Proposal> {
    Ok(Proposal {
        rule_kind: sequence_engine::RuleKind::Arithmetic,
        parameters: Default::default(),
        tags: Default::default(),
        hints: Vec::new(),
        explanation: String::new(),
        suggested_starting_value_sets: None,
    })
}

#[test]
fn test_invalid_source_terminates_with_fallback() {
    let orchestrator = Orchestrator::new(EngineConfig::default()).unwrap();
    let mut source = always_invalid;
    let outcome = orchestrator.generate(&mut source, "2024-06-15").unwrap();

    assert!(outcome.is_fallback);
    assert_eq!(outcome.attempts, 20);
    assert!(outcome.validation.valid);
}

#[test]
fn test_attempt_budget_is_configurable() {
    let config = EngineConfig::from_toml_str("[generation]\nmax_attempts = 3\n").unwrap();
    let orchestrator = Orchestrator::new(config).unwrap();

    let mut calls = 0;
    let mut source = |request: &ProposalRequest| -> Result<Proposal> {
        calls += 1;
        assert!(request.attempt <= 3);
        Err(EngineError::Proposal("timeout".into()))
    };
    let outcome = orchestrator.generate(&mut source, "2024-06-15").unwrap();
    assert!(outcome.is_fallback);
    assert_eq!(calls, 3);
}

#[test]
fn test_fallback_is_stable_per_date() {
    let orchestrator = Orchestrator::new(EngineConfig::default()).unwrap();
    let first = orchestrator.fallback("2025-01-01");
    for _ in 0..3 {
        assert_eq!(orchestrator.fallback("2025-01-01").puzzle, first.puzzle);
    }
}

#[test]
fn test_scripted_proposals_are_accepted() {
    let orchestrator = Orchestrator::new(EngineConfig::default()).unwrap();
    let mut source = ScriptedProposalSource::from_json_str(QUADRATIC_PROPOSALS).unwrap();
    let outcome = orchestrator.generate(&mut source, "2024-06-15").unwrap();

    assert!(!outcome.is_fallback);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.puzzle.sequences[0], vec![1, 4, 9, 16, 25]);
    assert_eq!(outcome.puzzle.answers, vec![36, 39, 42]);
    assert_eq!(source.remaining(), 0);
}

#[test]
fn test_unknown_token_in_proposal_file_is_fatal() {
    let json = QUADRATIC_PROPOSALS.replace("quadratic_positional", "hexagonal");
    assert!(matches!(
        ScriptedProposalSource::from_json_str(&json),
        Err(EngineError::UnknownRule(_))
    ));
}

#[test]
fn test_parallel_backfill_matches_sequential() {
    let orchestrator = Orchestrator::new(EngineConfig::default()).unwrap();
    let dates = date_range("2024-02-27", "2024-03-02").unwrap();
    assert_eq!(dates.len(), 5);

    let parallel: Vec<_> = dates
        .par_iter()
        .map(|date| {
            let mut source = always_invalid;
            orchestrator.generate(&mut source, date).unwrap().puzzle
        })
        .collect();

    for (date, puzzle) in dates.iter().zip(parallel.iter()) {
        assert_eq!(&orchestrator.fallback(date).puzzle, puzzle);
    }
}

#[test]
fn test_backfill_writes_every_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = JsonDirectorySink::new(dir.path()).unwrap();
    let orchestrator = Orchestrator::new(EngineConfig::default()).unwrap();

    for date in date_range("2024-12-30", "2025-01-02").unwrap() {
        let mut source = ScriptedProposalSource::from_json_str(QUADRATIC_PROPOSALS).unwrap();
        let outcome = orchestrator.generate(&mut source, &date).unwrap();
        sink.store(&date, &outcome).unwrap();
    }

    for date in ["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"] {
        let stored = std::fs::read_to_string(sink.path_for(date)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(value["date"], date);
        assert_eq!(value["isFallback"], false);
    }
}
