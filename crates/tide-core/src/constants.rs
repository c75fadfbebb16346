//! Protocol constants shared by every numerics component.

/// Discrete unit of protocol time.
pub type ChainEpoch = i64;

/// Number of fractional bits in one fixed-point width.
///
/// A `Q128` value `v` stands for `v / 2^PRECISION`. Every width used in the
/// workspace is a multiple of this constant.
///
/// # Examples
///
/// ```
/// use tide_core::{Q128, PRECISION};
/// use num_bigint::BigInt;
/// assert_eq!(Q128::one().raw(), &(BigInt::from(1) << PRECISION));
/// ```
pub const PRECISION: u32 = 128;

/// Seconds per epoch.
pub const EPOCH_DURATION_SECONDS: i64 = 30;

/// Epochs in one day at [`EPOCH_DURATION_SECONDS`].
pub const EPOCHS_IN_DAY: ChainEpoch = 24 * 60 * 60 / EPOCH_DURATION_SECONDS;

/// Fractional bits of [`LN_2_BYTES`].
pub const LN_2_BITS: u32 = 512;

/// `floor(ln(2) * 2^512)`, big-endian.
///
/// Narrower widths are obtained by shifting right, so any width whose
/// working precision fits in [`LN_2_BITS`] shares this one table.
pub const LN_2_BYTES: [u8; 64] = [
    0xb1, 0x72, 0x17, 0xf7, 0xd1, 0xcf, 0x79, 0xab, 0xc9, 0xe3, 0xb3, 0x98,
    0x03, 0xf2, 0xf6, 0xaf, 0x40, 0xf3, 0x43, 0x26, 0x72, 0x98, 0xb6, 0x2d,
    0x8a, 0x0d, 0x17, 0x5b, 0x8b, 0xaa, 0xfa, 0x2b, 0xe7, 0xb8, 0x76, 0x20,
    0x6d, 0xeb, 0xac, 0x98, 0x55, 0x95, 0x52, 0xfb, 0x4a, 0xfa, 0x1b, 0x10,
    0xed, 0x2e, 0xae, 0x35, 0xc1, 0x38, 0x21, 0x44, 0x27, 0x57, 0x3b, 0x29,
    0x11, 0x69, 0xb8, 0x25,
];

/// Decimal digits printed after the point by `Fixed`'s `Display`.
pub const DISPLAY_FRACTION_DIGITS: u32 = 18;
