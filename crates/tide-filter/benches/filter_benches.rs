//! Criterion benchmarks for tide-filter hot paths.
//!
//! Covers: natural log, extrapolation, both integrator branches, and one
//! alpha-beta filter step.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tide_core::constants::EPOCHS_IN_DAY;
use tide_core::{Q0, Q128};
use tide_filter::{extrapolated_cum_sum_of_ratio, AlphaBetaFilter, FilterEstimate};

fn bench_ln(c: &mut Criterion) {
    // 100e18, a realistic network-power magnitude.
    let x = Q128::from_int(100_000_000_000_000_000_000u128);

    c.bench_function("ln_q128", |b| b.iter(|| black_box(&x).ln()));
}

fn bench_extrapolate(c: &mut Criterion) {
    let est = FilterEstimate::from_integers(50_000_000_000_000_000_000u128, 25);

    c.bench_function("extrapolate", |b| {
        b.iter(|| black_box(&est).extrapolate(black_box(EPOCHS_IN_DAY)))
    });
}

fn bench_cum_sum_logarithmic(c: &mut Criterion) {
    let reward = FilterEstimate::from_integers(50_000_000_000_000_000_000u128, 25);
    let power = FilterEstimate::from_integers(10_000_000_000_000_000_000u128, 400_319_966_877_377u64);

    c.bench_function("cum_sum_ratio_logarithmic", |b| {
        b.iter(|| {
            extrapolated_cum_sum_of_ratio(
                black_box(EPOCHS_IN_DAY),
                black_box(0),
                black_box(&reward),
                black_box(&power),
            )
        })
    });
}

fn bench_cum_sum_linear(c: &mut Criterion) {
    let reward = FilterEstimate::from_integers(50_000_000_000_000_000_000u128, 25);
    let power = FilterEstimate::constant(10_000_000_000_000_000_000u128);

    c.bench_function("cum_sum_ratio_linear", |b| {
        b.iter(|| {
            extrapolated_cum_sum_of_ratio(
                black_box(EPOCHS_IN_DAY),
                black_box(0),
                black_box(&reward),
                black_box(&power),
            )
        })
    });
}

fn bench_filter_step(c: &mut Criterion) {
    let filter = AlphaBetaFilter::with_default_coefficients(FilterEstimate::constant(1_000_000u64));
    let observation = Q0::from_int(1_000_500u64);

    c.bench_function("alpha_beta_step", |b| {
        b.iter(|| filter.next_estimate(black_box(&observation), black_box(1)))
    });
}

criterion_group!(
    benches,
    bench_ln,
    bench_extrapolate,
    bench_cum_sum_logarithmic,
    bench_cum_sum_linear,
    bench_filter_step,
);
criterion_main!(benches);
