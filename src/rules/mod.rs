//! Rule programs and their evaluation

pub mod evaluator;
pub mod kind;
pub mod params;

pub use evaluator::{
    digit_sum, generate_multiple_sequences, generate_sequence, next_term, spread_seed,
    varied_parameters,
};
pub use kind::{Operation, OperationKind, PowerType, RuleKind};
pub use params::RuleParameters;
