//! Engine configuration with documented constants
//!
//! All calibration numbers are collected here with a note on what they
//! control. Changing the validation thresholds changes which puzzles are
//! accepted, so stored puzzles should be re-validated with the same values.

use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, loadable from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generation: GenerationConfig,
    pub validation: ValidationConfig,
}

/// Configuration for the generation loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Hard ceiling on propose/evaluate/validate attempts
    ///
    /// Once reached the orchestrator stops asking for proposals and
    /// selects a fallback puzzle for the date.
    pub max_attempts: u32,

    /// Number of sequences per puzzle (one primary plus alternates)
    ///
    /// Alternates exist to break ties between competing hypotheses,
    /// so at least two are needed for the ambiguity check to help.
    pub sequence_count: usize,

    /// Number of shown terms in every sequence
    pub sequence_length: usize,

    /// Which sequence is shown first to the solver
    pub primary_index: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            sequence_count: 3,
            sequence_length: 5,
            primary_index: 0,
        }
    }
}

/// Configuration for the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum number of terms a shown sequence must have
    pub min_sequence_length: usize,

    /// Smallest allowed term or answer
    pub min_value: i64,

    /// Largest allowed term or answer
    pub max_value: i64,

    /// Exact number of hints a puzzle carries
    pub required_hints: usize,

    /// Minimum explanation length in characters
    pub min_explanation_chars: usize,

    /// Mean absolute fit error below which the quadratic fit is trusted
    ///
    /// Empirically chosen. A fit this tight is treated as a real rival
    /// hypothesis for the primary sequence.
    pub quadratic_confidence_threshold: f64,

    /// Mean absolute fit error an alternate must stay under for the
    /// quadratic rival to count as explaining that alternate
    pub alternate_fit_threshold: f64,

    /// Determinant magnitude below which the normal equations are singular
    ///
    /// Below this the fit falls back to a line through the endpoints.
    pub singular_determinant_epsilon: f64,

    /// Tolerance for treating consecutive ratios as equal
    pub ratio_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_sequence_length: 4,
            min_value: -999,
            max_value: 999,
            required_hints: 2,
            min_explanation_chars: 10,
            quadratic_confidence_threshold: 0.5,
            alternate_fit_threshold: 0.5,
            singular_determinant_epsilon: 1e-10,
            ratio_tolerance: 1e-4,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;
        let validation = &self.validation;

        if generation.max_attempts == 0 {
            return Err(EngineError::Config("max_attempts must be at least 1".into()));
        }

        if generation.sequence_count == 0 {
            return Err(EngineError::Config("sequence_count must be at least 1".into()));
        }

        if generation.primary_index >= generation.sequence_count {
            return Err(EngineError::Config(format!(
                "primary_index ({}) must be < sequence_count ({})",
                generation.primary_index, generation.sequence_count
            )));
        }

        // Generated sequences would always fail the structural check
        if generation.sequence_length < validation.min_sequence_length {
            return Err(EngineError::Config(format!(
                "sequence_length ({}) should be >= min_sequence_length ({})",
                generation.sequence_length, validation.min_sequence_length
            )));
        }

        if validation.min_value >= validation.max_value {
            return Err(EngineError::Config(format!(
                "min_value ({}) should be < max_value ({})",
                validation.min_value, validation.max_value
            )));
        }

        if validation.singular_determinant_epsilon <= 0.0 || validation.ratio_tolerance <= 0.0 {
            return Err(EngineError::Config("Tolerances must be positive".into()));
        }

        if validation.quadratic_confidence_threshold <= 0.0
            || validation.alternate_fit_threshold <= 0.0
        {
            return Err(EngineError::Config("Fit thresholds must be positive".into()));
        }

        Ok(())
    }
}
