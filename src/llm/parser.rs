//! Ask the LLM for a rule proposal and parse its reply
//!
//! The LLM only picks a rule kind, parameters and narrative text. Sequences
//! and answers are always computed by the evaluator, never taken from the
//! model.

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::generation::{Proposal, ProposalRequest, ProposalSource};
use crate::llm::client::LlmClient;
use crate::llm::context::ProposalContext;
use tokio::runtime::Handle;

/// Request one proposal from the LLM
pub async fn request_proposal(client: &LlmClient, context: &ProposalContext) -> Result<Proposal> {
    let system_prompt = system_prompt();
    let user_prompt = format!(
        "{}\n\nPropose one puzzle rule as JSON:",
        context.summary()
    );

    let response = client.complete(&system_prompt, &user_prompt).await?;
    parse_proposal(&response)
}

/// Parse a proposal out of an LLM reply
///
/// Anything unusable, including an unrecognized rule token, is a
/// retryable proposal failure.
pub fn parse_proposal(response: &str) -> Result<Proposal> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        EngineError::Proposal(format!("Failed to parse proposal: {} - Response: {}", e, response))
    })
}

/// Extract the JSON object from an LLM reply (handles surrounding text)
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| EngineError::Proposal("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| EngineError::Proposal("No closing brace found in response".into()))?;
    if end < start {
        return Err(EngineError::Proposal("Malformed JSON in response".into()));
    }
    Ok(&response[start..=end])
}

/// Proposal source backed by an LLM
///
/// Blocks on a tokio runtime handle so the orchestrator stays synchronous.
/// Must not be driven from inside an async task.
pub struct LlmProposalSource {
    client: LlmClient,
    runtime: Handle,
    config: EngineConfig,
}

impl LlmProposalSource {
    pub fn new(client: LlmClient, runtime: Handle, config: EngineConfig) -> Self {
        Self {
            client,
            runtime,
            config,
        }
    }
}

impl ProposalSource for LlmProposalSource {
    fn propose(&mut self, request: &ProposalRequest) -> Result<Proposal> {
        let context =
            ProposalContext::new(request, &self.config.generation, &self.config.validation);
        tracing::debug!(date = %request.date, attempt = request.attempt, model = self.client.model(), "requesting proposal");

        self.runtime
            .block_on(request_proposal(&self.client, &context))
            .map_err(|e| match e {
                EngineError::Proposal(_) => e,
                other => EngineError::Proposal(other.to_string()),
            })
    }
}

fn system_prompt() -> String {
    format!(
        r#"You design daily number-sequence puzzles.
Pick ONE rule from the catalogue below and choose its parameters. The engine
computes the sequences and answers itself; do not include them.

RULE CATALOGUE (token: formula, n = 1-indexed position):
{}

PARAMETER FIELDS (camelCase, integers): difference, ratio, initialDiff,
diffIncrement, secondDifference, operations [{{"op": "add|subtract|multiply",
"value": int}}], oddMultiplier, oddAddend, evenMultiplier, evenAddend, a, b,
c, d, multiplier, addend, prevMultiplier, prev2Multiplier, multiplyFactor,
addFactor, powerType ("n_power" | "base_power" | "square_plus_base"),
exponent, base, startingValues [int].

GOOD PUZZLES:
- Are not solvable by a constant difference or constant ratio alone
- Keep every value small
- Have exactly two hints, the second more revealing than the first
- Explain the rule in one or two plain sentences

OUTPUT FORMAT (JSON only, no explanation):
{{
  "ruleKind": "token",
  "parameters": {{ ... }},
  "tags": ["short", "labels"],
  "hints": ["gentle hint", "stronger hint"],
  "explanation": "how the rule works",
  "suggestedStartingValueSets": [[1, 1], [2, 3], [3, 5]]
}}

Example:
{{"ruleKind": "alternating_operations", "parameters": {{"operations": [{{"op": "add", "value": 3}}, {{"op": "multiply", "value": 2}}], "startingValues": [1]}}, "tags": ["alternating"], "hints": ["Two steps take turns.", "Add three, then double."], "explanation": "The steps alternate: add 3, then multiply by 2."}}
"#,
        ProposalContext::rule_catalogue()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleKind;

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Here is my proposal:
{"ruleKind": "geometric", "parameters": {"ratio": 3}}
Hope it helps."#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_extract_json_no_json() {
        assert!(matches!(
            extract_json("I cannot help with that"),
            Err(EngineError::Proposal(_))
        ));
        assert!(extract_json("} backwards {").is_err());
    }

    #[test]
    fn test_parse_full_proposal() {
        let response = r#"```json
{
  "ruleKind": "digit_sum",
  "parameters": {"multiplier": 2, "addend": 1, "startingValues": [12]},
  "tags": ["digits"],
  "hints": ["Look inside each number.", "Add up the digits."],
  "explanation": "Add twice the digit sum plus one to get the next number."
}
```"#;
        let proposal = parse_proposal(response).unwrap();
        assert_eq!(proposal.rule_kind, RuleKind::DigitSum);
        assert_eq!(proposal.parameters.digit_sum_multiplier(), 2);
        assert_eq!(proposal.hints.len(), 2);
        assert!(proposal.suggested_starting_value_sets.is_none());
    }

    #[test]
    fn test_unknown_token_is_retryable() {
        let result = parse_proposal(r#"{"ruleKind": "spiral"}"#);
        match result {
            Err(e) => {
                assert!(matches!(e, EngineError::Proposal(_)));
                assert!(e.is_retryable());
            }
            Ok(_) => panic!("unknown token should not parse"),
        }
    }

    #[test]
    fn test_system_prompt_lists_catalogue() {
        let prompt = system_prompt();
        for kind in RuleKind::ALL {
            assert!(prompt.contains(kind.token()));
        }
        assert!(prompt.contains(r#""ruleKind": "token""#));
    }
}
