//! Prompt context for proposal requests
//!
//! Summarises what the LLM needs to know for one attempt: the date, the
//! rule catalogue it may choose from, the value limits, and why the last
//! attempt was rejected.

use crate::core::config::{GenerationConfig, ValidationConfig};
use crate::generation::ProposalRequest;
use crate::rules::RuleKind;

/// Context for one proposal prompt
pub struct ProposalContext {
    pub date: String,
    pub attempt: u32,
    pub feedback: Vec<String>,
    pub sequence_length: usize,
    pub sequence_count: usize,
    pub min_value: i64,
    pub max_value: i64,
}

impl ProposalContext {
    pub fn new(
        request: &ProposalRequest,
        generation: &GenerationConfig,
        validation: &ValidationConfig,
    ) -> Self {
        Self {
            date: request.date.clone(),
            attempt: request.attempt,
            feedback: request.feedback.clone(),
            sequence_length: generation.sequence_length,
            sequence_count: generation.sequence_count,
            min_value: validation.min_value,
            max_value: validation.max_value,
        }
    }

    /// Rule catalogue, one `token: formula` line per kind
    pub fn rule_catalogue() -> String {
        RuleKind::ALL
            .iter()
            .map(|kind| format!("- {}: {}", kind.token(), kind.describe()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the user-turn text
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("DATE: {}", self.date),
            format!("ATTEMPT: {}", self.attempt),
            format!(
                "The puzzle shows {} sequences of {} terms sharing one rule.",
                self.sequence_count, self.sequence_length
            ),
            format!(
                "Every term and next value must stay within [{}, {}].",
                self.min_value, self.max_value
            ),
        ];

        if !self.feedback.is_empty() {
            lines.push("THE PREVIOUS PROPOSAL WAS REJECTED:".into());
            lines.extend(self.feedback.iter().map(|f| format!("- {}", f)));
            lines.push("Choose different parameters or a different rule.".into());
        }

        lines.join("\n")
    }
}
