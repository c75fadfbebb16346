//! Position/velocity estimates.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use tide_core::{ChainEpoch, Q128, Q256};

/// A smoothed estimate of a quantity and its per-epoch rate of change.
///
/// Both fields are Q.128. The estimate is anchored at the epoch it was
/// produced for; [`extrapolate`](Self::extrapolate) takes an offset from
/// that epoch, never an absolute one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterEstimate {
    position: Q128,
    velocity: Q128,
}

impl FilterEstimate {
    pub fn new(position: Q128, velocity: Q128) -> Self {
        Self { position, velocity }
    }

    /// Build an estimate from integer (Q.0) position and velocity.
    pub fn from_integers(position: impl Into<BigInt>, velocity: impl Into<BigInt>) -> Self {
        Self::new(Q128::from_int(position), Q128::from_int(velocity))
    }

    /// An estimate with the given integer position and zero velocity.
    pub fn constant(value: impl Into<BigInt>) -> Self {
        Self::new(Q128::from_int(value), Q128::zero())
    }

    pub fn position(&self) -> &Q128 {
        &self.position
    }

    pub fn velocity(&self) -> &Q128 {
        &self.velocity
    }

    /// Linear projection `position + velocity * delta`, returned in Q.256.
    ///
    /// The product `velocity * delta` is Q.256, so the position is widened
    /// to match rather than narrowing the product.
    pub fn extrapolate(&self, delta: ChainEpoch) -> Q256 {
        let delta_t = Q128::from_int(delta);
        self.position.clone().rescale::<2>() + &self.velocity * &delta_t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_integers_scales_to_q128() {
        let est = FilterEstimate::from_integers(5, -3);
        assert_eq!(est.position(), &Q128::from_int(5));
        assert_eq!(est.velocity(), &Q128::from_int(-3));
    }

    #[test]
    fn constant_has_zero_velocity() {
        let est = FilterEstimate::constant(42);
        assert!(est.velocity().is_zero());
        assert_eq!(est.extrapolate(1_000_000), Q256::from_int(42));
    }

    #[test]
    fn extrapolate_at_zero_is_position() {
        let est = FilterEstimate::from_integers(7, 9);
        assert_eq!(est.extrapolate(0), Q256::from_int(7));
    }

    #[test]
    fn extrapolate_forward_and_backward() {
        let est = FilterEstimate::from_integers(100, -4);
        assert_eq!(est.extrapolate(10), Q256::from_int(60));
        assert_eq!(est.extrapolate(-10), Q256::from_int(140));
        assert_eq!(est.extrapolate(25), Q256::zero());
        assert_eq!(est.extrapolate(30), Q256::from_int(-20));
    }

    #[test]
    fn extrapolate_keeps_fractional_velocity() {
        // velocity 1/8 per epoch
        let est = FilterEstimate::new(Q128::from_int(1), Q128::one().shift(-3));
        assert_eq!(est.extrapolate(4), Q256::from_int(3).shift(-1));
    }

    #[test]
    fn extrapolate_huge_offset() {
        let est = FilterEstimate::from_integers(1, 1);
        let far: ChainEpoch = 1_000_000_000_000_000;
        assert_eq!(est.extrapolate(far), Q256::from_int(far + 1));
    }

    #[test]
    fn estimate_serde_round_trip() {
        let est = FilterEstimate::from_integers(123_456_789u64, -17);
        let json = serde_json::to_string(&est).unwrap();
        let back: FilterEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, est);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn zero_velocity_ignores_offset(p in any::<i64>(), t in any::<i64>()) {
            let est = FilterEstimate::constant(p);
            prop_assert_eq!(est.extrapolate(t), Q256::from_int(p));
        }

        #[test]
        fn extrapolation_is_affine(
            p in -1_000_000_000i64..1_000_000_000,
            v in -1_000_000i64..1_000_000,
            a in -1_000_000i64..1_000_000,
            b in -1_000_000i64..1_000_000,
        ) {
            let est = FilterEstimate::from_integers(p, v);
            let step = Q256::from_int(v * (b - a));
            prop_assert_eq!(est.extrapolate(b), est.extrapolate(a) + step);
        }
    }
}
