//! # tide-filter: smoothed estimates and their cumulative-ratio integral.
//!
//! All calculations use integer fixed-point arithmetic only for determinism.
//!
//! - **Estimates**: a [`FilterEstimate`] is an immutable position/velocity pair
//!   in Q.128, extrapolated linearly to any epoch offset.
//! - **Alpha-beta filter**: [`AlphaBetaFilter`] folds a new observation into
//!   the previous estimate.
//! - **Cumulative ratio**: [`extrapolated_cum_sum_of_ratio`] integrates the
//!   ratio of two extrapolated estimates over an epoch range in O(1), using a
//!   closed form with a natural-log term.

pub mod cum_sum;
pub mod estimate;
pub mod filter;

pub use cum_sum::{cum_sum_ratio_epsilon, extrapolated_cum_sum_of_ratio};
pub use estimate::FilterEstimate;
pub use filter::{default_alpha, default_beta, AlphaBetaFilter};
