//! # tide-core
//! Deterministic fixed-point numerics for protocol smoothing.
//!
//! All arithmetic is performed on arbitrary-precision integers carrying an
//! explicit binary scale. No floating point is used anywhere in this crate.

pub mod constants;
pub mod error;
pub mod fixed;
pub mod ln;

pub use constants::{ChainEpoch, PRECISION};
pub use error::{FilterError, MathError};
pub use fixed::{Fixed, TryDiv, Q0, Q128, Q256, Q384};
pub use ln::ln;
