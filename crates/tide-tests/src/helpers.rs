//! Shared reference computations for integration tests.

use num_bigint::BigInt;
use tide_core::{ChainEpoch, Q0, Q128, Q256};
use tide_filter::FilterEstimate;

/// Trapezoid-rule sum of `num / denom` over epochs
/// `relative_start..relative_start + delta`, in Q.128.
///
/// Endpoints are weighted once, interior points twice, and the total halved.
/// Costs `delta` divisions; this is what the closed form approximates.
pub fn iterative_cum_sum_of_ratio(
    num: &FilterEstimate,
    denom: &FilterEstimate,
    relative_start: ChainEpoch,
    delta: ChainEpoch,
) -> Q128 {
    let two = Q0::from_int(2);
    let mut ratio = Q128::zero();
    for i in 0..delta {
        let num_epsilon: Q256 = num.extrapolate(relative_start + i);
        let denom_epsilon: Q128 = denom.extrapolate(relative_start + i).rescale::<1>();
        let mut epsilon: Q128 = num_epsilon / denom_epsilon;
        if i != 0 && i != delta - 1 {
            epsilon = &two * &epsilon;
        }
        ratio += &epsilon;
    }
    ratio / two
}

/// Millionths of difference between `val1` and `val2`, relative to `val1`,
/// as an integer: `|val1 - val2| / val1 * 1e6`.
pub fn per_million_error(val1: &Q128, val2: &Q128) -> BigInt {
    let diff = (val1 - val2).rescale::<2>();
    let per_million: Q128 = diff / val1;
    let million = Q128::from_int(1_000_000);
    (&per_million * &million).abs().trunc()
}
