//! Path generation for Monte Carlo simulation.
//!
//! Geometric Brownian Motion under the risk-neutral measure, stepped with
//! the exact log-space update
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - 0.5σ²)dt + σ√dt × Z),   Z ~ N(0, 1)
//! ```
//!
//! Draws are consumed one step at a time: `n_paths` normals for step 1,
//! then `n_paths` for step 2, and so on.

use pricer_core::types::OptionParams;

use super::workspace::PathWorkspace;
use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionParams;
/// use pricer_pricing::mc::GbmParams;
///
/// let option = OptionParams::new(100.0, 95.0, 0.5, 0.03, 0.25).unwrap();
/// let gbm = GbmParams::from(&option);
/// assert_eq!(gbm.maturity, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }
}

impl From<&OptionParams> for GbmParams {
    fn from(params: &OptionParams) -> Self {
        Self::new(params.spot, params.rate, params.volatility, params.expiry)
    }
}

/// Fills `workspace` with GBM paths.
///
/// # Algorithm
///
/// 1. Precompute `drift_dt = (r - 0.5σ²)dt` and `vol_sqrt_dt = σ√dt`
/// 2. Row 0 ← spot for every path
/// 3. For each step, draw `n_paths` normals and advance every path
pub fn generate_gbm_paths(workspace: &mut PathWorkspace, params: GbmParams, rng: &mut PricerRng) {
    let n_paths = workspace.n_paths();
    let n_steps = workspace.n_steps();
    if n_paths == 0 || n_steps == 0 {
        return;
    }

    let dt = params.maturity / n_steps as f64;
    let drift_dt = (params.rate - 0.5 * params.volatility * params.volatility) * dt;
    let vol_sqrt_dt = params.volatility * dt.sqrt();

    let (paths, randoms) = workspace.paths_mut_and_randoms();
    paths[..n_paths].fill(params.spot);

    for step in 0..n_steps {
        rng.fill_normal(randoms);

        let (done, rest) = paths.split_at_mut((step + 1) * n_paths);
        let current = &done[step * n_paths..];
        let next = &mut rest[..n_paths];

        for ((s_next, &s_now), &z) in next.iter_mut().zip(current).zip(randoms.iter()) {
            *s_next = s_now * (drift_dt + vol_sqrt_dt * z).exp();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_row_is_spot() {
        let mut ws = PathWorkspace::new(50, 10);
        let mut rng = PricerRng::from_seed(1);
        generate_gbm_paths(&mut ws, GbmParams::new(80.0, 0.05, 0.2, 1.0), &mut rng);

        assert!(ws.step(0).iter().all(|&s| s == 80.0));
        assert!(ws.paths().iter().all(|&s| s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let params = GbmParams::new(100.0, 0.05, 0.3, 0.5);

        let mut ws1 = PathWorkspace::new(100, 20);
        let mut ws2 = PathWorkspace::new(100, 20);
        generate_gbm_paths(&mut ws1, params, &mut PricerRng::from_seed(77));
        generate_gbm_paths(&mut ws2, params, &mut PricerRng::from_seed(77));

        assert_eq!(ws1.paths(), ws2.paths());
    }

    #[test]
    fn test_step_major_draw_order() {
        // Reproduce the first two steps by hand from the same stream.
        let params = GbmParams::new(100.0, 0.02, 0.25, 1.0);
        let n_paths = 4;
        let n_steps = 2;

        let mut ws = PathWorkspace::new(n_paths, n_steps);
        generate_gbm_paths(&mut ws, params, &mut PricerRng::from_seed(5));

        let dt: f64 = 0.5;
        let drift_dt = (0.02 - 0.5 * 0.25 * 0.25) * dt;
        let vol_sqrt_dt = 0.25 * dt.sqrt();
        let mut rng = PricerRng::from_seed(5);

        let z1: Vec<f64> = (0..n_paths).map(|_| rng.gen_normal()).collect();
        let z2: Vec<f64> = (0..n_paths).map(|_| rng.gen_normal()).collect();

        for p in 0..n_paths {
            let s1 = 100.0 * (drift_dt + vol_sqrt_dt * z1[p]).exp();
            let s2 = s1 * (drift_dt + vol_sqrt_dt * z2[p]).exp();
            assert_relative_eq!(ws.step(1)[p], s1, epsilon = 1e-12);
            assert_relative_eq!(ws.terminal()[p], s2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        // E[S_T] = S₀ e^(rT)
        let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
        let mut ws = PathWorkspace::new(50_000, 4);
        generate_gbm_paths(&mut ws, params, &mut PricerRng::from_seed(123));

        let mean = ws.terminal().iter().sum::<f64>() / 50_000.0;
        let forward = 100.0 * 0.05_f64.exp();
        // Std error of the mean ≈ 21 / √50000 ≈ 0.095
        assert!((mean - forward).abs() < 0.5, "mean {} forward {}", mean, forward);
    }

    #[test]
    fn test_zero_volatility_is_deterministic_growth() {
        let params = GbmParams::new(100.0, 0.05, 0.0, 2.0);
        let mut ws = PathWorkspace::new(3, 8);
        generate_gbm_paths(&mut ws, params, &mut PricerRng::from_seed(0));

        for &s in ws.terminal() {
            assert_relative_eq!(s, 100.0 * 0.1_f64.exp(), epsilon = 1e-10);
        }
    }
}
