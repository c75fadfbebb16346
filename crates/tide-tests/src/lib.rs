//! Accuracy test suite for the Tide numerics toolkit.
//!
//! The integration tests compare the closed-form integrator against the
//! iterative trapezoid sum it replaces, and the logarithm against a reference
//! table computed offline at high precision.

pub mod helpers;
