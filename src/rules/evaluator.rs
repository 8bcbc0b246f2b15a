//! Rule evaluation: single terms, full sequences, and families of sequences
//!
//! Everything here is deterministic. Stored puzzles are re-validated by
//! regenerating them, so the seed-spread and parameter-variation rules
//! below must stay bit-exact.
//!
//! Term arithmetic saturates at the `i64` range instead of panicking;
//! saturated terms are far outside any accepted value range and fail the
//! structural check.

use crate::core::types::GeneratedSequence;
use crate::rules::kind::{PowerType, RuleKind};
use crate::rules::params::RuleParameters;

/// Quadratic constant term grows by this much per output sequence
const QUADRATIC_CONSTANT_STEP: i64 = 3;
/// Cubic constant term grows by this much per output sequence
const CUBIC_CONSTANT_STEP: i64 = 5;
/// `n^2 + base` rules grow their base by this much per output sequence
const SQUARE_PLUS_BASE_STEP: i64 = 2;
/// Other power rules grow their base by this much per output sequence
const POWER_BASE_STEP: i64 = 1;

/// Compute the term at 1-indexed `position` given the terms so far
///
/// Reads at most the last three terms; missing older terms count as 0.
pub fn next_term(
    sequence: &[i64],
    kind: RuleKind,
    params: &RuleParameters,
    position: usize,
) -> i64 {
    let term_count = sequence.len() as i64;
    let prev = recent(sequence, 1);
    let prev2 = recent(sequence, 2);
    let prev3 = recent(sequence, 3);
    let n = position as i64;

    match kind {
        RuleKind::Arithmetic => prev.saturating_add(params.difference()),
        RuleKind::Geometric => prev.saturating_mul(params.ratio()),
        RuleKind::LinearDifference => {
            let step = params
                .initial_diff()
                .saturating_add((term_count - 1).saturating_mul(params.diff_increment()));
            prev.saturating_add(step)
        }
        RuleKind::SecondOrderConstant => {
            if sequence.len() < 2 {
                prev.saturating_add(params.second_difference())
            } else {
                let last_diff = prev.saturating_sub(prev2);
                prev.saturating_add(last_diff.saturating_add(params.second_difference()))
            }
        }
        RuleKind::AlternatingOperations => {
            let operations = params.operations();
            let idx = (term_count - 1).rem_euclid(operations.len() as i64) as usize;
            operations[idx].apply(prev)
        }
        RuleKind::AlternatingParity => {
            if position % 2 == 1 {
                prev.saturating_mul(params.odd_multiplier())
                    .saturating_add(params.odd_addend())
            } else {
                prev.saturating_mul(params.even_multiplier())
                    .saturating_add(params.even_addend())
            }
        }
        RuleKind::QuadraticPositional => params
            .a()
            .saturating_mul(n.saturating_mul(n))
            .saturating_add(params.b().saturating_mul(n))
            .saturating_add(params.c()),
        RuleKind::CubicPositional => params
            .a()
            .saturating_mul(n.saturating_pow(3))
            .saturating_add(params.b().saturating_mul(n.saturating_mul(n)))
            .saturating_add(params.c().saturating_mul(n))
            .saturating_add(params.d()),
        RuleKind::LinearRecursive => prev
            .saturating_mul(params.multiplier())
            .saturating_add(params.addend()),
        RuleKind::FibonacciLike => prev
            .saturating_mul(params.prev_multiplier())
            .saturating_add(prev2.saturating_mul(params.prev2_multiplier())),
        RuleKind::TribonacciLike => prev.saturating_add(prev2).saturating_add(prev3),
        RuleKind::DigitSum => {
            let step = digit_sum(prev)
                .saturating_mul(params.digit_sum_multiplier())
                .saturating_add(params.digit_sum_addend());
            prev.saturating_add(step)
        }
        RuleKind::MultiplyAdd => prev
            .saturating_mul(params.multiply_factor())
            .saturating_add(params.add_factor()),
        RuleKind::PowerBased => match params.power_type() {
            PowerType::NPower => n.saturating_pow(params.exponent()),
            PowerType::BasePower => params.base().saturating_pow(position as u32),
            PowerType::SquarePlusBase => n.saturating_mul(n).saturating_add(params.base()),
        },
    }
}

/// Generate `length` terms and their continuation
///
/// Non-positional kinds are seeded from `starting_values`, then the
/// parameters' `startingValues`, then `[1]`. A seed longer than `length`
/// is cut to `length` terms.
pub fn generate_sequence(
    kind: RuleKind,
    params: &RuleParameters,
    length: usize,
    starting_values: Option<&[i64]>,
) -> GeneratedSequence {
    let mut sequence: Vec<i64> = Vec::with_capacity(length);

    if kind.is_positional() {
        for position in 1..=length {
            let term = next_term(&sequence, kind, params, position);
            sequence.push(term);
        }
    } else {
        let seed = match starting_values {
            Some(values) if !values.is_empty() => values.to_vec(),
            _ => params.seed(),
        };
        sequence.extend(seed.into_iter().take(length));
        while sequence.len() < length {
            let term = next_term(&sequence, kind, params, sequence.len() + 1);
            sequence.push(term);
        }
    }

    let next_value = next_term(&sequence, kind, params, length + 1);
    tracing::trace!(%kind, ?sequence, next_value, "generated sequence");
    GeneratedSequence { sequence, next_value }
}

/// Generate `count` visibly different sequences that share one rule
///
/// Positional kinds vary a parameter per output index (see
/// [`varied_parameters`]); seeded kinds spread their starting values with
/// [`spread_seed`].
pub fn generate_multiple_sequences(
    kind: RuleKind,
    params: &RuleParameters,
    count: usize,
    length: usize,
) -> Vec<GeneratedSequence> {
    (0..count)
        .map(|i| {
            if kind.is_positional() {
                generate_sequence(kind, &varied_parameters(kind, params, i), length, None)
            } else {
                let seed = spread_seed(&params.seed(), i);
                generate_sequence(kind, params, length, Some(&seed))
            }
        })
        .collect()
}

/// Parameters used for output sequence `i` of a positional kind
///
/// Quadratic rules shift `c` by 3 per index, cubic rules shift `d` by 5,
/// power rules shift `base` by 2 (`n^2 + base`) or 1. Seeded kinds are
/// returned unchanged. Re-validation relies on this being the exact
/// variation used at generation time.
pub fn varied_parameters(kind: RuleKind, params: &RuleParameters, i: usize) -> RuleParameters {
    let step = i as i64;
    match kind {
        RuleKind::QuadraticPositional => RuleParameters {
            c: Some(params.c().saturating_add(QUADRATIC_CONSTANT_STEP.saturating_mul(step))),
            ..params.clone()
        },
        RuleKind::CubicPositional => RuleParameters {
            d: Some(params.d().saturating_add(CUBIC_CONSTANT_STEP.saturating_mul(step))),
            ..params.clone()
        },
        RuleKind::PowerBased => {
            let base_step = match params.power_type() {
                PowerType::SquarePlusBase => SQUARE_PLUS_BASE_STEP,
                _ => POWER_BASE_STEP,
            };
            RuleParameters {
                base: Some(params.base().saturating_add(base_step.saturating_mul(step))),
                ..params.clone()
            }
        }
        _ => params.clone(),
    }
}

/// Seed set for output index `i`: value at `idx` becomes `v + i*(idx+1)*2`
pub fn spread_seed(base: &[i64], i: usize) -> Vec<i64> {
    let i = i as i64;
    base.iter()
        .enumerate()
        .map(|(idx, &v)| v.saturating_add(i.saturating_mul(idx as i64 + 1).saturating_mul(2)))
        .collect()
}

/// Sum of the decimal digits of `|value|`
pub fn digit_sum(value: i64) -> i64 {
    let mut remaining = value.unsigned_abs();
    let mut sum = 0u64;
    while remaining > 0 {
        sum += remaining % 10;
        remaining /= 10;
    }
    sum as i64
}

/// The `back`-th most recent term, or 0 if the sequence is shorter
fn recent(sequence: &[i64], back: usize) -> i64 {
    sequence
        .len()
        .checked_sub(back)
        .map(|idx| sequence[idx])
        .unwrap_or(0)
}
