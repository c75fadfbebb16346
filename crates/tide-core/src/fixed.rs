//! Width-typed fixed-point numbers.
//!
//! A [`Fixed<N>`] holds an arbitrary-precision signed integer `raw` and stands
//! for the real number `raw / 2^(N * PRECISION)`. The width `N` is part of the
//! type, so two values of different widths cannot be added, subtracted or
//! compared without an explicit [`Fixed::rescale`]. Products and quotients
//! change width the way the underlying integer arithmetic does:
//!
//! - `Fixed<A> * Fixed<B> -> Fixed<A + B>`
//! - `Fixed<A> / Fixed<B> -> Fixed<A - B>`, truncating toward zero
//!
//! The `/` operator panics on a zero divisor, exactly like integer division.
//! Code that divides by caller-supplied values uses [`TryDiv::try_div`], which
//! reports [`MathError::DivisionByZero`] instead.
//!
//! Integer division drops every fractional bit the dividend does not carry
//! beyond the divisor's, so to keep `PRECISION` bits in a quotient the dividend
//! is rescaled up first:
//!
//! ```
//! use tide_core::Q128;
//! let a = Q128::from_int(1);
//! let b = Q128::from_int(4);
//! let quarter: Q128 = a.rescale::<2>() / b;
//! assert_eq!(quarter, Q128::one().shift(-2));
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_FRACTION_DIGITS, PRECISION};
use crate::error::MathError;

/// A signed fixed-point number with `N * PRECISION` fractional bits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed<const N: u32>(BigInt);

/// Plain integers (`Q.0`).
pub type Q0 = Fixed<0>;
/// One precision width (`Q.128`), the width estimates and results live in.
pub type Q128 = Fixed<1>;
/// Two precision widths (`Q.256`), the raw product of two `Q128` values.
pub type Q256 = Fixed<2>;
/// Three precision widths (`Q.384`).
pub type Q384 = Fixed<3>;

impl<const N: u32> Fixed<N> {
    /// Fractional bits carried by this width.
    pub const FRAC_BITS: u32 = N * PRECISION;

    /// Wrap a raw integer already scaled by `2^FRAC_BITS`.
    pub fn from_raw(raw: BigInt) -> Self {
        Self(raw)
    }

    /// The fixed-point representation of an integer.
    pub fn from_int(value: impl Into<BigInt>) -> Self {
        Self(value.into() << Self::FRAC_BITS)
    }

    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn one() -> Self {
        Self(BigInt::one() << Self::FRAC_BITS)
    }

    pub fn raw(&self) -> &BigInt {
        &self.0
    }

    pub fn into_raw(self) -> BigInt {
        self.0
    }

    /// Move the value to width `M`.
    ///
    /// Widening is exact. Narrowing shifts right, which rounds toward
    /// negative infinity.
    pub fn rescale<const M: u32>(self) -> Fixed<M> {
        let raw = if M >= N {
            self.0 << ((M - N) * PRECISION)
        } else {
            self.0 >> ((N - M) * PRECISION)
        };
        Fixed(raw)
    }

    /// Multiply by `2^n` within the same width. Negative `n` shifts right.
    pub fn shift(self, n: i64) -> Self {
        if n >= 0 {
            Self(self.0 << n.unsigned_abs())
        } else {
            Self(self.0 >> n.unsigned_abs())
        }
    }

    /// Integer part, rounded toward negative infinity.
    pub fn trunc(&self) -> BigInt {
        &self.0 >> Self::FRAC_BITS
    }

    pub fn sign(&self) -> Sign {
        self.0.sign()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
}

impl<const N: u32> fmt::Display for Fixed<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = Self::FRAC_BITS;
        let magnitude = self.0.magnitude();
        let integer = magnitude >> bits;
        let mask = (BigUint::one() << bits) - 1u32;
        let fraction = ((magnitude & mask) * BigUint::from(10u32).pow(DISPLAY_FRACTION_DIGITS)) >> bits;
        let sign = if self.0.is_negative() { "-" } else { "" };
        write!(
            f,
            "{sign}{integer}.{:0>width$}",
            fraction.to_string(),
            width = DISPLAY_FRACTION_DIGITS as usize
        )
    }
}

impl<const N: u32> FromStr for Fixed<N> {
    type Err = MathError;

    /// Parse a plain signed decimal such as `"-12.5"`.
    ///
    /// Fractional digits beyond the width's resolution are truncated toward
    /// zero. Exponent notation is rejected.
    fn from_str(s: &str) -> Result<Self, MathError> {
        let invalid = || MathError::InvalidDecimal(s.to_string());
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mantissa = BigInt::from_str(&format!("{int_part}{frac_part}")).map_err(|_| invalid())?;
        let scale = BigInt::from(10u32).pow(frac_part.len() as u32);
        let raw = (mantissa << Self::FRAC_BITS) / scale;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

// --- same-width arithmetic ---

macro_rules! impl_same_width_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<const N: u32> $trait<Fixed<N>> for Fixed<N> {
            type Output = Fixed<N>;
            fn $method(self, rhs: Fixed<N>) -> Fixed<N> {
                Fixed(self.0 $op rhs.0)
            }
        }

        impl<const N: u32> $trait<&Fixed<N>> for Fixed<N> {
            type Output = Fixed<N>;
            fn $method(self, rhs: &Fixed<N>) -> Fixed<N> {
                Fixed(self.0 $op &rhs.0)
            }
        }

        impl<const N: u32> $trait<Fixed<N>> for &Fixed<N> {
            type Output = Fixed<N>;
            fn $method(self, rhs: Fixed<N>) -> Fixed<N> {
                Fixed(&self.0 $op rhs.0)
            }
        }

        impl<const N: u32> $trait<&Fixed<N>> for &Fixed<N> {
            type Output = Fixed<N>;
            fn $method(self, rhs: &Fixed<N>) -> Fixed<N> {
                Fixed(&self.0 $op &rhs.0)
            }
        }
    };
}

impl_same_width_op!(Add, add, +);
impl_same_width_op!(Sub, sub, -);

impl<const N: u32> AddAssign<&Fixed<N>> for Fixed<N> {
    fn add_assign(&mut self, rhs: &Fixed<N>) {
        self.0 += &rhs.0;
    }
}

impl<const N: u32> SubAssign<&Fixed<N>> for Fixed<N> {
    fn sub_assign(&mut self, rhs: &Fixed<N>) {
        self.0 -= &rhs.0;
    }
}

impl<const N: u32> Neg for Fixed<N> {
    type Output = Fixed<N>;
    fn neg(self) -> Fixed<N> {
        Fixed(-self.0)
    }
}

impl<const N: u32> Neg for &Fixed<N> {
    type Output = Fixed<N>;
    fn neg(self) -> Fixed<N> {
        Fixed(-&self.0)
    }
}

// --- width-changing arithmetic ---

macro_rules! impl_mul {
    ($($a:literal * $b:literal => $c:literal),* $(,)?) => {$(
        impl Mul<Fixed<$b>> for Fixed<$a> {
            type Output = Fixed<$c>;
            fn mul(self, rhs: Fixed<$b>) -> Fixed<$c> {
                Fixed(self.0 * rhs.0)
            }
        }

        impl Mul<&Fixed<$b>> for Fixed<$a> {
            type Output = Fixed<$c>;
            fn mul(self, rhs: &Fixed<$b>) -> Fixed<$c> {
                Fixed(self.0 * &rhs.0)
            }
        }

        impl Mul<Fixed<$b>> for &Fixed<$a> {
            type Output = Fixed<$c>;
            fn mul(self, rhs: Fixed<$b>) -> Fixed<$c> {
                Fixed(&self.0 * rhs.0)
            }
        }

        impl Mul<&Fixed<$b>> for &Fixed<$a> {
            type Output = Fixed<$c>;
            fn mul(self, rhs: &Fixed<$b>) -> Fixed<$c> {
                Fixed(&self.0 * &rhs.0)
            }
        }
    )*};
}

impl_mul!(
    0 * 0 => 0,
    0 * 1 => 1,
    1 * 0 => 1,
    0 * 2 => 2,
    2 * 0 => 2,
    0 * 3 => 3,
    3 * 0 => 3,
    1 * 1 => 2,
    1 * 2 => 3,
    2 * 1 => 3,
);

/// Division that reports a zero divisor instead of panicking.
///
/// Implemented for the same width pairs as `Div`, with the same truncation
/// toward zero.
///
/// ```
/// use tide_core::{MathError, Q128, TryDiv};
/// let x = Q128::from_int(3).rescale::<2>();
/// assert_eq!(x.try_div(&Q128::from_int(2)), Ok("1.5".parse::<Q128>().unwrap()));
/// assert_eq!(x.try_div(&Q128::zero()), Err(MathError::DivisionByZero));
/// ```
pub trait TryDiv<Rhs> {
    type Output;
    fn try_div(&self, rhs: &Rhs) -> Result<Self::Output, MathError>;
}

macro_rules! impl_div {
    ($($a:literal / $b:literal => $c:literal),* $(,)?) => {$(
        impl TryDiv<Fixed<$b>> for Fixed<$a> {
            type Output = Fixed<$c>;
            fn try_div(&self, rhs: &Fixed<$b>) -> Result<Fixed<$c>, MathError> {
                if rhs.0.is_zero() {
                    return Err(MathError::DivisionByZero);
                }
                Ok(Fixed(&self.0 / &rhs.0))
            }
        }

        /// Panics on a zero divisor, like integer division.
        impl Div<&Fixed<$b>> for &Fixed<$a> {
            type Output = Fixed<$c>;
            fn div(self, rhs: &Fixed<$b>) -> Fixed<$c> {
                Fixed(&self.0 / &rhs.0)
            }
        }

        impl Div<Fixed<$b>> for Fixed<$a> {
            type Output = Fixed<$c>;
            fn div(self, rhs: Fixed<$b>) -> Fixed<$c> {
                Fixed(self.0 / rhs.0)
            }
        }

        impl Div<&Fixed<$b>> for Fixed<$a> {
            type Output = Fixed<$c>;
            fn div(self, rhs: &Fixed<$b>) -> Fixed<$c> {
                Fixed(self.0 / &rhs.0)
            }
        }
    )*};
}

impl_div!(
    0 / 0 => 0,
    1 / 0 => 1,
    1 / 1 => 0,
    2 / 0 => 2,
    2 / 1 => 1,
    2 / 2 => 0,
    3 / 0 => 3,
    3 / 1 => 2,
    3 / 2 => 1,
    3 / 3 => 0,
);
