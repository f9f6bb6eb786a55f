//! Criterion benchmarks for analytical and Monte Carlo pricing.
//!
//! Benchmarks cover:
//! - Black-Scholes price and all five Greeks
//! - Monte Carlo European pricing (1K, 10K, 100K paths)
//! - RNG batch generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{OptionParams, OptionType};
use pricer_models::analytical::{greeks, option_price};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
use pricer_pricing::rng::PricerRng;

fn standard_params() -> OptionParams {
    OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

/// Benchmark the closed-form engine.
fn bench_analytical(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytical");
    let params = standard_params();

    group.bench_function("black_scholes_call", |b| {
        b.iter(|| option_price(black_box(&params), black_box(OptionType::Call)))
    });

    group.bench_function("greeks_all", |b| {
        b.iter(|| greeks(black_box(&params), black_box(OptionType::Put)))
    });

    group.finish();
}

/// Benchmark Monte Carlo pricing with varying path counts.
fn bench_mc_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc_pricing");
    group.sample_size(10);

    // Quarter-year expiry keeps the 100K case to 63 steps.
    let params = standard_params().with_expiry(0.25).unwrap();

    for n_paths in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("european_call", n_paths),
            &n_paths,
            |b, &n| {
                let config = MonteCarloConfig::builder()
                    .n_paths(n)
                    .seed(42)
                    .build()
                    .unwrap();
                let pricer = MonteCarloPricer::new(config).unwrap();
                b.iter(|| pricer.price(black_box(&params), black_box(OptionType::Call)))
            },
        );
    }

    group.finish();
}

/// Benchmark RNG batch generation.
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_analytical, bench_mc_pricing, bench_rng_generation);
criterion_main!(benches);
