//! Error types for the Tide numerics toolkit.
use num_bigint::BigInt;
use thiserror::Error;

use crate::constants::ChainEpoch;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("logarithm of non-positive value (raw {0})")] NonPositiveLogarithm(BigInt),
    #[error("division by zero")] DivisionByZero,
    #[error("{bits} fractional bits exceed the ln(2) table")] WidthTooLarge { bits: u32 },
    #[error("invalid decimal: {0:?}")] InvalidDecimal(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("epoch delta must be positive, got {0}")] NonPositiveEpochDelta(ChainEpoch),
    #[error("denominator not positive over epochs {start}..={end}")] NonPositiveDenominator { start: ChainEpoch, end: ChainEpoch },
    #[error(transparent)] Math(#[from] MathError),
}
