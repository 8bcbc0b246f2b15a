//! Sequence Engine - command line entry point
//!
//! Generates daily puzzles (one date or a backfill range), validates stored
//! puzzles, and previews rule sequences.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use sequence_engine::core::calendar::date_range;
use sequence_engine::core::error::{EngineError, Result};
use sequence_engine::generation::{
    GenerationOutcome, JsonDirectorySink, Orchestrator, Proposal, ProposalRequest,
    ProposalSource, PuzzleSink, ScriptedProposalSource,
};
use sequence_engine::llm::{LlmClient, LlmProposalSource};
use sequence_engine::rules::{generate_multiple_sequences, RuleKind, RuleParameters};
use sequence_engine::{EngineConfig, PuzzleCandidate};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "sequence-engine")]
#[command(about = "Generate and validate rule-based number sequence puzzles")]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the puzzle for one date
    Generate {
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// JSON file of proposals to replay instead of asking the LLM
        #[arg(long)]
        proposals: Option<PathBuf>,

        /// Directory to write <date>.json into (prints to stdout otherwise)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate puzzles for every date in a range, in parallel
    Backfill {
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// JSON file of proposals to replay for every date
        #[arg(long)]
        proposals: Option<PathBuf>,

        /// Directory to write <date>.json files into
        #[arg(long)]
        out: PathBuf,
    },

    /// Re-validate a stored puzzle JSON file
    Validate {
        /// Puzzle file
        file: PathBuf,
    },

    /// Print sequences for a rule
    Sequence {
        /// Rule kind token (e.g. fibonacci_like)
        #[arg(long)]
        rule: String,

        /// Parameters as JSON (camelCase fields)
        #[arg(long, default_value = "{}")]
        params: String,

        /// Terms per sequence
        #[arg(long, default_value_t = 5)]
        length: usize,

        /// Number of sequences
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sequence_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Generate {
            date,
            proposals,
            out,
        } => {
            let orchestrator = Orchestrator::new(config.clone())?;
            let runtime = Runtime::new()?;
            let mut source = build_source(proposals.as_deref(), &config, &runtime)?;
            let outcome = orchestrator.generate(source.as_mut(), &date)?;
            match out {
                Some(dir) => JsonDirectorySink::new(dir)?.store(&date, &outcome)?,
                None => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
        }

        Command::Backfill {
            from,
            to,
            proposals,
            out,
        } => {
            let dates = date_range(&from, &to)?;
            let orchestrator = Orchestrator::new(config.clone())?;
            let runtime = Runtime::new()?;
            let sink = Mutex::new(JsonDirectorySink::new(out)?);

            tracing::info!(days = dates.len(), "backfilling");
            let outcomes: Vec<Result<GenerationOutcome>> = dates
                .par_iter()
                .map(|date| {
                    let mut source = build_source(proposals.as_deref(), &config, &runtime)?;
                    let outcome = orchestrator.generate(source.as_mut(), date)?;
                    sink.lock()
                        .map_err(|_| EngineError::Io(std::io::Error::other("sink lock poisoned")))?
                        .store(date, &outcome)?;
                    Ok(outcome)
                })
                .collect();

            let mut fallbacks = 0;
            for outcome in outcomes {
                let outcome = outcome?;
                if outcome.is_fallback {
                    fallbacks += 1;
                }
                println!(
                    "{}  {:<24} attempts={:<2} {}",
                    outcome.date,
                    outcome.puzzle.rule_kind,
                    outcome.attempts,
                    if outcome.is_fallback { "FALLBACK" } else { "ok" }
                );
            }
            println!("{} dates, {} fallbacks", dates.len(), fallbacks);
        }

        Command::Validate { file } => {
            let content = std::fs::read_to_string(&file)?;
            let puzzle = PuzzleCandidate::from_json(&content)?;
            let orchestrator = Orchestrator::new(config)?;
            let result = orchestrator.validator().revalidate(&puzzle);

            println!("valid: {}", result.valid);
            for error in result.error_messages() {
                println!("  error: {}", error);
            }
            for warning in result.warning_messages() {
                println!("  warning: {}", warning);
            }
        }

        Command::Sequence {
            rule,
            params,
            length,
            count,
        } => {
            let kind: RuleKind = rule.parse()?;
            let params: RuleParameters = serde_json::from_str(&params)?;
            for generated in generate_multiple_sequences(kind, &params, count, length) {
                let terms: Vec<String> = generated.sequence.iter().map(|t| t.to_string()).collect();
                println!("{}, ... -> {}", terms.join(", "), generated.next_value);
            }
        }
    }

    Ok(())
}

/// Pick the proposal source: scripted file, then LLM, then none
///
/// With no source every attempt fails and the date gets its fallback.
fn build_source(
    proposals: Option<&Path>,
    config: &EngineConfig,
    runtime: &Runtime,
) -> Result<Box<dyn ProposalSource>> {
    if let Some(path) = proposals {
        return Ok(Box::new(ScriptedProposalSource::from_json_file(path)?));
    }

    match LlmClient::from_env() {
        Ok(client) => Ok(Box::new(LlmProposalSource::new(
            client,
            runtime.handle().clone(),
            config.clone(),
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "no LLM configured - falling back to catalog puzzles");
            Ok(Box::new(|_: &ProposalRequest| -> Result<Proposal> {
                Err(EngineError::Proposal("No proposal source configured".into()))
            }))
        }
    }
}
