//! The closed set of rule programs

use crate::core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule program kinds
///
/// The set is closed: adding a kind means extending the evaluator's
/// dispatch as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RuleKind {
    /// prev + difference
    Arithmetic,
    /// prev * ratio
    Geometric,
    /// Differences grow linearly
    LinearDifference,
    /// Differences of differences are constant
    SecondOrderConstant,
    /// Cycle through a list of operations
    AlternatingOperations,
    /// Different affine step on odd and even positions
    AlternatingParity,
    /// a*n^2 + b*n + c
    QuadraticPositional,
    /// a*n^3 + b*n^2 + c*n + d
    CubicPositional,
    /// multiplier*prev + addend
    LinearRecursive,
    /// Weighted sum of the two previous terms
    FibonacciLike,
    /// Sum of the three previous terms
    TribonacciLike,
    /// Adds a multiple of the digit sum
    DigitSum,
    /// prev*factor + addend
    MultiplyAdd,
    /// Positional powers
    PowerBased,
}

impl RuleKind {
    pub const ALL: [RuleKind; 14] = [
        RuleKind::Arithmetic,
        RuleKind::Geometric,
        RuleKind::LinearDifference,
        RuleKind::SecondOrderConstant,
        RuleKind::AlternatingOperations,
        RuleKind::AlternatingParity,
        RuleKind::QuadraticPositional,
        RuleKind::CubicPositional,
        RuleKind::LinearRecursive,
        RuleKind::FibonacciLike,
        RuleKind::TribonacciLike,
        RuleKind::DigitSum,
        RuleKind::MultiplyAdd,
        RuleKind::PowerBased,
    ];

    /// Wire token for this kind
    pub fn token(self) -> &'static str {
        match self {
            RuleKind::Arithmetic => "arithmetic",
            RuleKind::Geometric => "geometric",
            RuleKind::LinearDifference => "linear_difference",
            RuleKind::SecondOrderConstant => "second_order_constant",
            RuleKind::AlternatingOperations => "alternating_operations",
            RuleKind::AlternatingParity => "alternating_parity",
            RuleKind::QuadraticPositional => "quadratic_positional",
            RuleKind::CubicPositional => "cubic_positional",
            RuleKind::LinearRecursive => "linear_recursive",
            RuleKind::FibonacciLike => "fibonacci_like",
            RuleKind::TribonacciLike => "tribonacci_like",
            RuleKind::DigitSum => "digit_sum",
            RuleKind::MultiplyAdd => "multiply_add",
            RuleKind::PowerBased => "power_based",
        }
    }

    /// Terms depend only on the 1-indexed position, never on earlier terms
    pub fn is_positional(self) -> bool {
        matches!(
            self,
            RuleKind::QuadraticPositional | RuleKind::CubicPositional | RuleKind::PowerBased
        )
    }

    /// Sequences are grown from a seed of starting values
    pub fn requires_starting_values(self) -> bool {
        !self.is_positional()
    }

    /// One-line description used when prompting proposal sources
    pub fn describe(self) -> &'static str {
        match self {
            RuleKind::Arithmetic => "prev + difference",
            RuleKind::Geometric => "prev * ratio",
            RuleKind::LinearDifference => {
                "prev + (initialDiff + (termCount-1) * diffIncrement)"
            }
            RuleKind::SecondOrderConstant => "prev + ((prev - prev2) + secondDifference)",
            RuleKind::AlternatingOperations => {
                "cycle through operations [{op: add|subtract|multiply, value}] applied to prev"
            }
            RuleKind::AlternatingParity => {
                "odd position: prev*oddMultiplier + oddAddend; even: prev*evenMultiplier + evenAddend"
            }
            RuleKind::QuadraticPositional => "a*n^2 + b*n + c",
            RuleKind::CubicPositional => "a*n^3 + b*n^2 + c*n + d",
            RuleKind::LinearRecursive => "multiplier*prev + addend",
            RuleKind::FibonacciLike => "prevMultiplier*prev + prev2Multiplier*prev2",
            RuleKind::TribonacciLike => "prev + prev2 + prev3",
            RuleKind::DigitSum => "prev + (digitSum(prev)*multiplier + addend)",
            RuleKind::MultiplyAdd => "prev*multiplyFactor + addFactor",
            RuleKind::PowerBased => {
                "powerType n_power: n^exponent; base_power: base^n; square_plus_base: n^2 + base"
            }
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.token())
    }
}

impl FromStr for RuleKind {
    type Err = EngineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.token() == token)
            .ok_or_else(|| EngineError::UnknownRule(token.to_string()))
    }
}

impl TryFrom<String> for RuleKind {
    type Error = EngineError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<RuleKind> for String {
    fn from(kind: RuleKind) -> Self {
        kind.token().to_string()
    }
}

/// Operation applied by alternating-operation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
}

/// One step of an alternating-operation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(alias = "kind")]
    pub op: OperationKind,
    pub value: i64,
}

impl Operation {
    pub fn new(op: OperationKind, value: i64) -> Self {
        Self { op, value }
    }

    pub fn apply(&self, prev: i64) -> i64 {
        match self.op {
            OperationKind::Add => prev.saturating_add(self.value),
            OperationKind::Subtract => prev.saturating_sub(self.value),
            OperationKind::Multiply => prev.saturating_mul(self.value),
        }
    }
}

/// Sub-mode of power-based rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerType {
    /// n^exponent
    #[default]
    NPower,
    /// base^n
    BasePower,
    /// n^2 + base
    SquarePlusBase,
}
