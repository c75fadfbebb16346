//! Natural logarithm of positive fixed-point values.
//!
//! `ln(x)` splits `x = m * 2^k` with the mantissa `m` in `[1, 2)` and
//! evaluates
//!
//! ```text
//! ln(x) = k * ln(2) + 2 * atanh(z),   z = (m - 1) / (m + 1)
//! ```
//!
//! On `[1, 2)` we have `0 <= z < 1/3`, so each odd power of `z` in the atanh
//! series is at least nine times smaller than the one before it and the loop
//! terminates after at most `bits / 3` terms. The work is carried out with
//! [`GUARD_BITS`] extra fractional bits, which absorb the truncation error of
//! the series and of `ln(2)` before the result is narrowed back to the input
//! width. The integer part of the result matches the exact logarithm across
//! the tested range (about `1e-10` to `2e22`).

use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

use crate::constants::{LN_2_BITS, LN_2_BYTES};
use crate::error::MathError;
use crate::fixed::Fixed;

/// Extra fractional bits carried through the computation.
pub const GUARD_BITS: u32 = 16;

/// Natural logarithm of `x`, in the same width as `x`.
///
/// Fails with [`MathError::NonPositiveLogarithm`] for `x <= 0`.
///
/// # Examples
///
/// ```
/// use tide_core::{ln, Q128};
/// assert_eq!(ln(&Q128::one()).unwrap(), Q128::zero());
/// assert!(ln(&Q128::zero()).is_err());
/// ```
pub fn ln<const N: u32>(x: &Fixed<N>) -> Result<Fixed<N>, MathError> {
    if !x.is_positive() {
        return Err(MathError::NonPositiveLogarithm(x.raw().clone()));
    }
    let frac_bits = Fixed::<N>::FRAC_BITS;
    let work_bits = frac_bits + GUARD_BITS;
    if work_bits > LN_2_BITS {
        return Err(MathError::WidthTooLarge { bits: frac_bits });
    }

    // x = m * 2^k with m in [1, 2)
    let k = x.raw().bits() as i64 - 1 - i64::from(frac_bits);
    let scaled = x.raw() << GUARD_BITS;
    let mantissa = if k >= 0 {
        scaled >> k.unsigned_abs()
    } else {
        scaled << k.unsigned_abs()
    };

    let log_mantissa = ln_one_to_two(&mantissa, work_bits);
    let log = BigInt::from(k) * ln_2(work_bits) + log_mantissa;
    Ok(Fixed::from_raw(log >> GUARD_BITS))
}

impl<const N: u32> Fixed<N> {
    /// Natural logarithm, see [`ln`].
    pub fn ln(&self) -> Result<Self, MathError> {
        ln(self)
    }
}

/// `ln(2)` with `bits` fractional bits, truncated.
fn ln_2(bits: u32) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &LN_2_BYTES) >> (LN_2_BITS - bits)
}

/// `ln(m)` for `m` in `[1, 2)`, both with `bits` fractional bits.
fn ln_one_to_two(m: &BigInt, bits: u32) -> BigInt {
    let one = BigInt::one() << bits;
    let z = ((m - &one) << bits) / (m + &one);
    let z_squared = (&z * &z) >> bits;

    let mut sum = z.clone();
    let mut power = z;
    let mut divisor = 1u32;
    loop {
        power = (power * &z_squared) >> bits;
        if power.is_zero() {
            break;
        }
        divisor += 2;
        sum += &power / divisor;
    }
    sum << 1u32
}
