//! Sparse rule parameters
//!
//! One record serves every rule kind. Fields the active kind does not read
//! are ignored, and every formula field has a default so partially specified
//! proposals still evaluate.

use crate::rules::kind::{Operation, OperationKind, PowerType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_diff: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_increment: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_difference: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odd_multiplier: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odd_addend: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub even_multiplier: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub even_addend: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<i64>,
    /// Used by linear-recursive and digit-sum rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<i64>,
    /// Used by linear-recursive and digit-sum rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addend: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_multiplier: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev2_multiplier: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiply_factor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_factor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_type: Option<PowerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<i64>,
    /// Seed for non-positional kinds; ignored by positional ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_values: Option<Vec<i64>>,
}

// === FIELD DEFAULTS ===

pub const DEFAULT_DIFFERENCE: i64 = 2;
pub const DEFAULT_RATIO: i64 = 2;
pub const DEFAULT_INITIAL_DIFF: i64 = 1;
pub const DEFAULT_DIFF_INCREMENT: i64 = 1;
pub const DEFAULT_SECOND_DIFFERENCE: i64 = 1;
pub const DEFAULT_ODD_MULTIPLIER: i64 = 1;
pub const DEFAULT_ODD_ADDEND: i64 = 1;
pub const DEFAULT_EVEN_MULTIPLIER: i64 = 2;
pub const DEFAULT_EVEN_ADDEND: i64 = 0;
pub const DEFAULT_A: i64 = 1;
pub const DEFAULT_B: i64 = 0;
pub const DEFAULT_C: i64 = 0;
pub const DEFAULT_D: i64 = 0;
pub const DEFAULT_MULTIPLIER: i64 = 2;
pub const DEFAULT_ADDEND: i64 = 1;
pub const DEFAULT_PREV_MULTIPLIER: i64 = 1;
pub const DEFAULT_PREV2_MULTIPLIER: i64 = 1;
pub const DEFAULT_DIGIT_SUM_MULTIPLIER: i64 = 1;
pub const DEFAULT_DIGIT_SUM_ADDEND: i64 = 0;
pub const DEFAULT_MULTIPLY_FACTOR: i64 = 2;
pub const DEFAULT_ADD_FACTOR: i64 = 1;
pub const DEFAULT_EXPONENT: u32 = 2;
pub const DEFAULT_BASE: i64 = 2;
/// Seed used when neither the caller nor the parameters supply one
pub const DEFAULT_SEED: i64 = 1;

impl RuleParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn difference(&self) -> i64 {
        self.difference.unwrap_or(DEFAULT_DIFFERENCE)
    }

    pub fn ratio(&self) -> i64 {
        self.ratio.unwrap_or(DEFAULT_RATIO)
    }

    pub fn initial_diff(&self) -> i64 {
        self.initial_diff.unwrap_or(DEFAULT_INITIAL_DIFF)
    }

    pub fn diff_increment(&self) -> i64 {
        self.diff_increment.unwrap_or(DEFAULT_DIFF_INCREMENT)
    }

    pub fn second_difference(&self) -> i64 {
        self.second_difference.unwrap_or(DEFAULT_SECOND_DIFFERENCE)
    }

    /// Operation cycle; an absent or empty list falls back to add 2 / multiply 2
    pub fn operations(&self) -> Vec<Operation> {
        match &self.operations {
            Some(ops) if !ops.is_empty() => ops.clone(),
            _ => vec![
                Operation::new(OperationKind::Add, 2),
                Operation::new(OperationKind::Multiply, 2),
            ],
        }
    }

    pub fn odd_multiplier(&self) -> i64 {
        self.odd_multiplier.unwrap_or(DEFAULT_ODD_MULTIPLIER)
    }

    pub fn odd_addend(&self) -> i64 {
        self.odd_addend.unwrap_or(DEFAULT_ODD_ADDEND)
    }

    pub fn even_multiplier(&self) -> i64 {
        self.even_multiplier.unwrap_or(DEFAULT_EVEN_MULTIPLIER)
    }

    pub fn even_addend(&self) -> i64 {
        self.even_addend.unwrap_or(DEFAULT_EVEN_ADDEND)
    }

    pub fn a(&self) -> i64 {
        self.a.unwrap_or(DEFAULT_A)
    }

    pub fn b(&self) -> i64 {
        self.b.unwrap_or(DEFAULT_B)
    }

    pub fn c(&self) -> i64 {
        self.c.unwrap_or(DEFAULT_C)
    }

    pub fn d(&self) -> i64 {
        self.d.unwrap_or(DEFAULT_D)
    }

    pub fn multiplier(&self) -> i64 {
        self.multiplier.unwrap_or(DEFAULT_MULTIPLIER)
    }

    pub fn addend(&self) -> i64 {
        self.addend.unwrap_or(DEFAULT_ADDEND)
    }

    /// Digit-sum rules share the `multiplier`/`addend` fields but default differently
    pub fn digit_sum_multiplier(&self) -> i64 {
        self.multiplier.unwrap_or(DEFAULT_DIGIT_SUM_MULTIPLIER)
    }

    pub fn digit_sum_addend(&self) -> i64 {
        self.addend.unwrap_or(DEFAULT_DIGIT_SUM_ADDEND)
    }

    pub fn prev_multiplier(&self) -> i64 {
        self.prev_multiplier.unwrap_or(DEFAULT_PREV_MULTIPLIER)
    }

    pub fn prev2_multiplier(&self) -> i64 {
        self.prev2_multiplier.unwrap_or(DEFAULT_PREV2_MULTIPLIER)
    }

    pub fn multiply_factor(&self) -> i64 {
        self.multiply_factor.unwrap_or(DEFAULT_MULTIPLY_FACTOR)
    }

    pub fn add_factor(&self) -> i64 {
        self.add_factor.unwrap_or(DEFAULT_ADD_FACTOR)
    }

    pub fn power_type(&self) -> PowerType {
        self.power_type.unwrap_or_default()
    }

    pub fn exponent(&self) -> u32 {
        self.exponent.unwrap_or(DEFAULT_EXPONENT)
    }

    pub fn base(&self) -> i64 {
        self.base.unwrap_or(DEFAULT_BASE)
    }

    /// Starting values, or the single default seed
    pub fn seed(&self) -> Vec<i64> {
        match &self.starting_values {
            Some(values) if !values.is_empty() => values.clone(),
            _ => vec![DEFAULT_SEED],
        }
    }
}
