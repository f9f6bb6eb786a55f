//! Analytical comparison tests for Monte Carlo pricing.
//!
//! These tests verify that Monte Carlo prices converge to the Black-Scholes
//! closed form for European options.
//!
//! # Test Categories
//!
//! 1. **Agreement**: MC within a few standard errors of the closed form
//! 2. **Convergence**: Price error decreases with path count
//! 3. **Reproducibility**: Same seed, same bits

use pricer_core::traits::EuropeanPricer;
use pricer_core::types::{OptionParams, OptionType, PricingError};
use pricer_models::analytical::{option_price, AnalyticalPricer};
use pricer_pricing::mc::{monte_carlo_price, MonteCarloConfig, MonteCarloPricer};

/// Standard test parameters: S=K=100, T=1, r=5%, σ=20%.
fn standard_params() -> OptionParams {
    OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

fn pricer(n_paths: usize, seed: u64) -> MonteCarloPricer {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .seed(seed)
        .build()
        .unwrap();
    MonteCarloPricer::new(config).unwrap()
}

// ============================================================================
// Agreement Tests
// ============================================================================

#[test]
fn test_european_call_mc_vs_analytical() {
    let params = standard_params();
    let analytical = option_price(&params, OptionType::Call).unwrap();
    let mc = pricer(50_000, 42).price(&params, OptionType::Call).unwrap();

    let error = (mc.price - analytical).abs();
    assert!(
        error < 3.0 * mc.std_error,
        "MC {} vs BS {}: error {} exceeds 3 std errors ({})",
        mc.price,
        analytical,
        error,
        mc.std_error
    );
}

#[test]
fn test_european_put_mc_vs_analytical() {
    let params = standard_params();
    let analytical = option_price(&params, OptionType::Put).unwrap();
    let mc = pricer(50_000, 42).price(&params, OptionType::Put).unwrap();

    assert!(
        (mc.price - analytical).abs() < 3.0 * mc.std_error,
        "MC {} vs BS {} (se {})",
        mc.price,
        analytical,
        mc.std_error
    );
}

#[test]
fn test_moneyness_sweep_mc_vs_analytical() {
    let p = pricer(40_000, 11);
    for strike in [80.0, 100.0, 120.0] {
        let params = OptionParams::new(100.0, strike, 0.5, 0.03, 0.3).unwrap();
        for option_type in OptionType::ALL {
            let analytical = option_price(&params, option_type).unwrap();
            let mc = p.price(&params, option_type).unwrap();
            assert!(
                (mc.price - analytical).abs() < 4.0 * mc.std_error + 1e-3,
                "K={} {}: MC {} vs BS {} (se {})",
                strike,
                option_type,
                mc.price,
                analytical,
                mc.std_error
            );
        }
    }
}

#[test]
fn test_pricers_interchangeable_behind_trait() {
    let params = standard_params();
    let engines: Vec<Box<dyn EuropeanPricer>> =
        vec![Box::new(AnalyticalPricer), Box::new(pricer(50_000, 3))];

    let prices: Vec<f64> = engines
        .iter()
        .map(|engine| engine.price(&params, OptionType::Call).unwrap())
        .collect();

    assert_eq!(engines[0].name(), "black-scholes");
    assert_eq!(engines[1].name(), "monte-carlo");
    assert!((prices[0] - prices[1]).abs() < 0.25);
}

// ============================================================================
// Convergence Tests
// ============================================================================

#[test]
fn test_error_decreases_with_path_count() {
    let params = standard_params().with_expiry(0.25).unwrap();
    let analytical = option_price(&params, OptionType::Call).unwrap();

    let mean_error = |n_paths: usize| -> f64 {
        let total: f64 = (1..=5u64)
            .map(|seed| {
                let mc = monte_carlo_price(&params, OptionType::Call, n_paths, seed).unwrap();
                (mc - analytical).abs()
            })
            .sum();
        total / 5.0
    };

    let coarse = mean_error(1_000);
    let fine = mean_error(100_000);
    assert!(
        fine < coarse,
        "mean error at 100K paths ({}) should be below 1K paths ({})",
        fine,
        coarse
    );
}

#[test]
fn test_std_error_shrinks_like_inverse_sqrt() {
    let params = standard_params();
    let small = pricer(2_500, 7).price(&params, OptionType::Call).unwrap();
    let large = pricer(40_000, 7).price(&params, OptionType::Call).unwrap();

    // 16× paths → ~4× smaller standard error
    let ratio = small.std_error / large.std_error;
    assert!(ratio > 3.0 && ratio < 5.0, "ratio {}", ratio);
}

// ============================================================================
// Reproducibility and Validation
// ============================================================================

#[test]
fn test_reproducible_across_pricer_instances() {
    let params = OptionParams::new(95.0, 100.0, 0.75, 0.02, 0.35).unwrap();
    let a = monte_carlo_price(&params, OptionType::Put, 10_000, 2024).unwrap();
    let b = monte_carlo_price(&params, OptionType::Put, 10_000, 2024).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn test_zero_paths_rejected() {
    let result = monte_carlo_price(&standard_params(), OptionType::Call, 0, 42);
    assert!(matches!(
        result,
        Err(PricingError::InvalidParameter { name: "n_paths", .. })
    ));
}

#[test]
fn test_invalid_volatility_rejected() {
    let params = OptionParams {
        volatility: -0.2,
        ..standard_params()
    };
    let err = pricer(100, 1).price(&params, OptionType::Call).unwrap_err();
    assert!(err.is_invalid_parameter());
}
