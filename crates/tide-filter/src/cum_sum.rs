//! Closed-form cumulative sum of the ratio of two extrapolated estimates.
//!
//! For a numerator `x1(t) = p1 + v1 t` and a denominator `x2(t) = p2 + v2 t`,
//!
//! ```text
//! ∫ x1 / x2 dt = v1 / v2 · t + (p1 v2 − v1 p2) / v2² · ln(x2(t))
//! ```
//!
//! so the sum over `[t0, t0 + Δ]` costs two logarithms instead of `Δ`
//! divisions. When `v2` is (nearly) zero the coefficient above degenerates to
//! `0 / 0`; the denominator is then taken as the constant `p2` and the
//! numerator is evaluated at the midpoint of the range.

use tide_core::{ChainEpoch, FilterError, Q128, TryDiv};
use tracing::trace;

use crate::estimate::FilterEstimate;

/// Below this squared denominator velocity (`2^-50` in Q.128) the linear
/// form is used.
pub fn cum_sum_ratio_epsilon() -> Q128 {
    Q128::one().shift(-50)
}

/// Approximate `Σ num(t) / denom(t)` for `t` in
/// `[relative_start, relative_start + delta]`, in Q.128.
///
/// Epochs are offsets from the epoch both estimates are anchored at. The
/// result tracks the trapezoid-rule sum over the same range to within a few
/// hundred parts per million for ranges of a day or more.
///
/// Fails when `delta <= 0`, or when the denominator is not strictly positive
/// at both ends of the range (being affine, it is then positive throughout).
pub fn extrapolated_cum_sum_of_ratio(
    delta: ChainEpoch,
    relative_start: ChainEpoch,
    num: &FilterEstimate,
    denom: &FilterEstimate,
) -> Result<Q128, FilterError> {
    if delta <= 0 {
        return Err(FilterError::NonPositiveEpochDelta(delta));
    }
    let delta_t = Q128::from_int(delta);
    let t0 = Q128::from_int(relative_start);

    let (position_1, velocity_1) = (num.position(), num.velocity());
    let (position_2, velocity_2) = (denom.position(), denom.velocity());

    let denom_start = denom.extrapolate(relative_start).rescale::<1>();
    let denom_end = (velocity_2 * &delta_t).rescale::<1>() + &denom_start;
    if !denom_start.is_positive() || !denom_end.is_positive() {
        return Err(FilterError::NonPositiveDenominator {
            start: relative_start,
            end: relative_start.saturating_add(delta),
        });
    }

    let squared_velocity_2 = (velocity_2 * velocity_2).rescale::<1>();

    if squared_velocity_2 >= cum_sum_ratio_epsilon() {
        trace!(delta, relative_start, "cum sum of ratio: logarithmic form");
        let ln_start = denom_start.ln()?;
        let ln_end = denom_end.ln()?;

        // (ln_end - ln_start) * p1 * v2, Q.384 -> Q.256
        let m1 = (&(&(&ln_end - &ln_start) * position_1) * velocity_2).rescale::<2>();

        // v1 * ((ln_start - ln_end) * p2 + v2 * delta), Q.384 -> Q.256
        let m2_l = &(&ln_start - &ln_end) * position_2;
        let m2_r = velocity_2 * &delta_t;
        let m2 = (velocity_1 * &(m2_l + m2_r)).rescale::<2>();

        return Ok((m1 + m2).try_div(&squared_velocity_2)?);
    }

    trace!(delta, relative_start, "cum sum of ratio: linear form");
    let midpoint = t0 + delta_t.clone().shift(-1);
    let num_mid = (velocity_1 * &midpoint).rescale::<1>() + position_1;

    Ok((num_mid * delta_t).try_div(position_2)?)
}
