//! Alpha-beta filter producing [`FilterEstimate`]s from raw observations.
//!
//! Each step predicts the position forward by the elapsed epochs, measures
//! the residual against the new observation, and corrects position by
//! `alpha * residual` and velocity by `beta * residual / elapsed`.

use num_bigint::BigInt;
use tide_core::{ChainEpoch, FilterError, Q0, Q128, TryDiv};
use tracing::debug;

use crate::estimate::FilterEstimate;

/// Default position gain, `9.25e-4` in Q.128.
pub fn default_alpha() -> Q128 {
    Q128::from_raw(BigInt::from(31_476u32) * BigInt::from(10u32).pow(31))
}

/// Default velocity gain, `2.84e-7` in Q.128.
pub fn default_beta() -> Q128 {
    Q128::from_raw(BigInt::from(966_401u32) * BigInt::from(10u32).pow(26))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBetaFilter {
    alpha: Q128,
    beta: Q128,
    prev_estimate: FilterEstimate,
}

impl AlphaBetaFilter {
    pub fn new(alpha: Q128, beta: Q128, prev_estimate: FilterEstimate) -> Self {
        Self {
            alpha,
            beta,
            prev_estimate,
        }
    }

    pub fn with_default_coefficients(prev_estimate: FilterEstimate) -> Self {
        Self::new(default_alpha(), default_beta(), prev_estimate)
    }

    pub fn alpha(&self) -> &Q128 {
        &self.alpha
    }

    pub fn beta(&self) -> &Q128 {
        &self.beta
    }

    /// The estimate the next observation will be folded into.
    pub fn estimate(&self) -> &FilterEstimate {
        &self.prev_estimate
    }

    /// Fold `observation`, taken `epoch_delta` epochs after the current
    /// estimate, into a new estimate. The filter itself is left unchanged.
    pub fn next_estimate(
        &self,
        observation: &Q0,
        epoch_delta: ChainEpoch,
    ) -> Result<FilterEstimate, FilterError> {
        if epoch_delta <= 0 {
            return Err(FilterError::NonPositiveEpochDelta(epoch_delta));
        }
        let delta_t = Q128::from_int(epoch_delta);
        let prev = &self.prev_estimate;

        let predicted = (&delta_t * prev.velocity()).rescale::<1>() + prev.position();
        let residual = observation.clone().rescale::<1>() - &predicted;

        let position = (&self.alpha * &residual).rescale::<1>() + &predicted;
        let velocity = (&self.beta * &residual).try_div(&delta_t)? + prev.velocity();

        debug!(epoch_delta, residual = %residual, "alpha-beta filter step");
        Ok(FilterEstimate::new(position, velocity))
    }

    /// Like [`next_estimate`](Self::next_estimate), but keeps the result as
    /// the filter's current estimate.
    pub fn advance(
        &mut self,
        observation: &Q0,
        epoch_delta: ChainEpoch,
    ) -> Result<&FilterEstimate, FilterError> {
        self.prev_estimate = self.next_estimate(observation, epoch_delta)?;
        Ok(&self.prev_estimate)
    }
}
