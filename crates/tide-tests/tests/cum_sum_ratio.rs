//! The closed-form cumulative ratio against the iterative trapezoid sum.
//!
//! Both methods approximate the same integral, so this is an agreement
//! check rather than a measurement of either one's error. The bound was set
//! from observed values; it loosens sharply for short ranges.

use num_bigint::BigInt;
use tide_core::constants::EPOCHS_IN_DAY;
use tide_core::{ChainEpoch, FilterError, Q128, Q256};
use tide_filter::{extrapolated_cum_sum_of_ratio, FilterEstimate};
use tide_tests::helpers::{iterative_cum_sum_of_ratio, per_million_error};

/// Millionths of disagreement tolerated between the two methods.
const ERR_BOUND: u32 = 350;

fn estimate(position: impl Into<BigInt>, velocity: impl Into<BigInt>) -> FilterEstimate {
    FilterEstimate::from_integers(position, velocity)
}

fn error_per_million(
    num: &FilterEstimate,
    denom: &FilterEstimate,
    delta: ChainEpoch,
    relative_start: ChainEpoch,
) -> BigInt {
    let analytic = extrapolated_cum_sum_of_ratio(delta, relative_start, num, denom).unwrap();
    let iterative = iterative_cum_sum_of_ratio(num, denom, relative_start, delta);
    per_million_error(&analytic, &iterative)
}

fn assert_err_bound(
    num: &FilterEstimate,
    denom: &FilterEstimate,
    delta: ChainEpoch,
    relative_start: ChainEpoch,
) {
    let err = error_per_million(num, denom, delta, relative_start);
    assert!(
        err < BigInt::from(ERR_BOUND),
        "error {err} >= {ERR_BOUND} per million for num {num:?} denom {denom:?} delta {delta}"
    );
}

// --- constant estimates ---

#[test]
fn constant_estimate_over_thousand_epochs() {
    let num = FilterEstimate::constant(4_000_000);
    let denom = FilterEstimate::constant(1);
    let csr = extrapolated_cum_sum_of_ratio(1_000, 0, &num, &denom).unwrap();
    assert_eq!(csr.trunc(), BigInt::from(4_000_000_000u64));

    // velocity is zero, so moving the start changes nothing
    let shifted = extrapolated_cum_sum_of_ratio(1_000, 1_000_000_000_000_000, &num, &denom).unwrap();
    assert_eq!(shifted.trunc(), csr.trunc());
}

#[test]
fn constant_estimate_fractional_ratio() {
    let num = FilterEstimate::constant(1_000_000_000_000u64);
    let denom = FilterEstimate::constant(200_000_000_000_000u64);
    let csr = extrapolated_cum_sum_of_ratio(100, 0, &num, &denom).unwrap();
    // truncated to an integer the half vanishes
    assert_eq!(csr.trunc(), BigInt::from(0));

    let product: Q256 = &csr * &Q128::from_int(10_000);
    assert_eq!(product.trunc(), BigInt::from(5_000));
}

// --- agreement with the iterative sum ---

#[test]
fn both_positive_velocity() {
    assert_err_bound(&estimate(111, 33), &estimate(3456, 8), 10_000, 0);
}

#[test]
fn flipped_signs() {
    assert_err_bound(&estimate(1_000_000, -100), &estimate(70_000, 1_000), 100_000, 0);
}

#[test]
fn both_negative_velocity() {
    assert_err_bound(
        &estimate(5_000_000, -20),
        &estimate(1_000_000_000, -3_000),
        20_000,
        0,
    );
}

#[test]
fn negative_numerator() {
    assert_err_bound(&estimate(-4_000, -7), &estimate(1_000_000, -5), 20_000, 0);
    assert_err_bound(&estimate(-4_000, -7), &estimate(1_000_000, -5), 20_000, 3_000);
}

#[test]
fn range_before_reference_epoch() {
    assert_err_bound(
        &estimate(100_000_000, 1_000),
        &estimate(1_000_000_000_000u64, 1_000_000),
        50_000,
        -1_000,
    );
    assert_err_bound(
        &estimate(7_000_000_000u64, -3),
        &estimate(5_000_000_000u64, 20_000),
        40_000,
        -10_000,
    );
}

#[test]
fn agreement_tightens_with_longer_ranges() {
    let num = estimate(111, 33);
    let denom = estimate(3456, 8);
    let short = error_per_million(&num, &denom, 1_000, 0);
    let medium = error_per_million(&num, &denom, 10_000, 0);
    let long = error_per_million(&num, &denom, 100_000, 0);
    assert!(short > medium, "short {short} medium {medium}");
    assert!(medium > long, "medium {medium} long {long}");
}

#[test]
fn values_in_reward_range() {
    let fifty_tokens = BigInt::from(50) * BigInt::from(1_000_000_000_000_000_000u64);
    let slow_money = estimate(fifty_tokens.clone(), 25);
    let fast_money = estimate(fifty_tokens, 100);

    let exbibyte = BigInt::from(1_000_000_000_000_000_000u64);
    let tens_of_eibs = BigInt::from(10) * &exbibyte;
    let thousands_of_eibs = BigInt::from(20_000) * &exbibyte;

    let one_byte_per_epoch = BigInt::from(1);
    let ten_pibs_per_day = BigInt::from(10u64 << 50) / BigInt::from(EPOCHS_IN_DAY);
    let one_eib_per_day = BigInt::from(1u64 << 60) / BigInt::from(EPOCHS_IN_DAY);

    for power_position in [&tens_of_eibs, &thousands_of_eibs] {
        for power_velocity in [&one_byte_per_epoch, &ten_pibs_per_day, &one_eib_per_day] {
            let power = estimate(power_position.clone(), power_velocity.clone());
            assert_err_bound(&slow_money, &power, EPOCHS_IN_DAY, 0);
            assert_err_bound(&fast_money, &power, EPOCHS_IN_DAY, 0);
        }
    }
}

// --- domain ---

#[test]
fn denominator_reaching_zero_is_rejected() {
    let num = estimate(1_000, 0);
    let denom = estimate(1_000, -1);
    assert_eq!(
        extrapolated_cum_sum_of_ratio(1_000, 0, &num, &denom),
        Err(FilterError::NonPositiveDenominator { start: 0, end: 1_000 })
    );
    assert!(extrapolated_cum_sum_of_ratio(999, 0, &num, &denom).is_ok());
}
