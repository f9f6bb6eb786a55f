//! Brent's bounded scalar minimiser.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Outcome of a successful bounded minimisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeResult<T: Float> {
    /// Abscissa of the located minimum.
    pub x: T,
    /// Objective value at `x`.
    pub fun: T,
    /// Number of objective evaluations performed.
    pub iterations: usize,
}

/// Brent's method for minimising a scalar function on a closed interval.
///
/// No derivatives are required. Each step is either a parabolic
/// interpolation through the three best points seen so far or, when the
/// parabola is unusable, a golden-section step into the larger
/// sub-interval. The objective is never evaluated outside `[lower, upper]`.
///
/// When the true minimum lies outside the interval the minimiser converges
/// to the nearest bound.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentMinimizer, SolverConfig};
///
/// let minimizer = BrentMinimizer::new(SolverConfig::default());
///
/// // Minimum of |x² - 2| on [0, 3] is at √2
/// let result = minimizer.minimize(|x: f64| (x * x - 2.0).abs(), 0.0, 3.0).unwrap();
/// assert!((result.x - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BrentMinimizer<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentMinimizer<T> {
    /// Create a new minimiser with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a minimiser with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Access the configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Minimise `f` over `[lower, upper]`.
    ///
    /// # Arguments
    ///
    /// * `f` - Objective function
    /// * `lower` - Lower bound of the search interval
    /// * `upper` - Upper bound of the search interval (must exceed `lower`)
    ///
    /// # Returns
    ///
    /// * `Ok(MinimizeResult)` - Located minimum and evaluation count
    /// * `Err(SolverError::InvalidBounds)` - Bounds not finite or not ordered
    /// * `Err(SolverError::NonFiniteObjective)` - `f` returned NaN or infinity
    /// * `Err(SolverError::MaxIterationsExceeded)` - Evaluation budget exhausted
    pub fn minimize<F>(&self, f: F, lower: T, upper: T) -> Result<MinimizeResult<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(SolverError::InvalidBounds {
                lower: to_f64(lower),
                upper: to_f64(upper),
            });
        }

        let half = T::from(0.5).unwrap_or_else(T::zero);
        let two = T::one() + T::one();
        let three = two + T::one();
        let five = three + two;
        let golden_mean = half * (three - five.sqrt());
        let sqrt_eps = T::from(2.2e-16).unwrap_or_else(T::epsilon).sqrt();
        let xatol = self.config.tolerance;

        let evaluate = |x: T| -> Result<T, SolverError> {
            let fx = f(x);
            if fx.is_finite() {
                Ok(fx)
            } else {
                Err(SolverError::NonFiniteObjective { x: to_f64(x) })
            }
        };

        let mut a = lower;
        let mut b = upper;

        // Best point (xf), second best (nfc) and previous second best (fulc).
        let mut xf = a + golden_mean * (b - a);
        let mut fx = evaluate(xf)?;
        let mut evaluations = 1;
        let mut nfc = xf;
        let mut fnfc = fx;
        let mut fulc = xf;
        let mut ffulc = fx;

        let mut rat = T::zero();
        let mut e = T::zero();

        let mut xm = half * (a + b);
        let mut tol1 = sqrt_eps * xf.abs() + xatol / three;
        let mut tol2 = two * tol1;

        while (xf - xm).abs() > tol2 - half * (b - a) {
            if evaluations >= self.config.max_iterations {
                return Err(SolverError::MaxIterationsExceeded {
                    iterations: evaluations,
                });
            }

            let mut golden_step = true;

            if e.abs() > tol1 {
                golden_step = false;

                let mut r = (xf - nfc) * (fx - ffulc);
                let mut q = (xf - fulc) * (fx - fnfc);
                let mut p = (xf - fulc) * q - (xf - nfc) * r;
                q = two * (q - r);
                if q > T::zero() {
                    p = -p;
                }
                q = q.abs();
                r = e;
                e = rat;

                let acceptable =
                    p.abs() < (half * q * r).abs() && p > q * (a - xf) && p < q * (b - xf);

                if acceptable {
                    rat = p / q;
                    let x = xf + rat;
                    if (x - a) < tol2 || (b - x) < tol2 {
                        rat = tol1 * sign_or_one(xm - xf);
                    }
                } else {
                    golden_step = true;
                }
            }

            if golden_step {
                e = if xf >= xm { a - xf } else { b - xf };
                rat = golden_mean * e;
            }

            let x = xf + sign_or_one(rat) * rat.abs().max(tol1);
            let fu = evaluate(x)?;
            evaluations += 1;

            if fu <= fx {
                if x >= xf {
                    a = xf;
                } else {
                    b = xf;
                }
                fulc = nfc;
                ffulc = fnfc;
                nfc = xf;
                fnfc = fx;
                xf = x;
                fx = fu;
            } else {
                if x < xf {
                    a = x;
                } else {
                    b = x;
                }
                if fu <= fnfc || nfc == xf {
                    fulc = nfc;
                    ffulc = fnfc;
                    nfc = x;
                    fnfc = fu;
                } else if fu <= ffulc || fulc == xf || fulc == nfc {
                    fulc = x;
                    ffulc = fu;
                }
            }

            xm = half * (a + b);
            tol1 = sqrt_eps * xf.abs() + xatol / three;
            tol2 = two * tol1;
        }

        Ok(MinimizeResult {
            x: xf,
            fun: fx,
            iterations: evaluations,
        })
    }
}

/// Sign of `x`, treating zero as positive.
#[inline]
fn sign_or_one<T: Float>(x: T) -> T {
    if x < T::zero() {
        -T::one()
    } else {
        T::one()
    }
}

#[inline]
fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // Interior minima
    // ==========================================================

    #[test]
    fn test_quadratic_minimum() {
        let minimizer = BrentMinimizer::with_defaults();
        let result = minimizer
            .minimize(|x: f64| (x - 2.0).powi(2) + 1.0, 0.0, 5.0)
            .unwrap();

        assert_relative_eq!(result.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(result.fun, 1.0, epsilon = 1e-12);
        assert!(result.iterations > 1);
    }

    #[test]
    fn test_absolute_value_kink() {
        // Non-smooth objective: parabolic steps get rejected near the kink
        let minimizer = BrentMinimizer::with_defaults();
        let result = minimizer
            .minimize(|x: f64| (x * x - 2.0).abs(), 0.0, 3.0)
            .unwrap();

        assert_relative_eq!(result.x, std::f64::consts::SQRT_2, epsilon = 1e-6);
        assert!(result.fun < 1e-6);
    }

    #[test]
    fn test_cosine_minimum() {
        let minimizer = BrentMinimizer::with_defaults();
        let result = minimizer.minimize(|x: f64| x.cos(), 2.0, 4.5).unwrap();

        assert_relative_eq!(result.x, std::f64::consts::PI, epsilon = 1e-6);
        assert_relative_eq!(result.fun, -1.0, epsilon = 1e-12);
    }

    // ==========================================================
    // Boundary behaviour
    // ==========================================================

    #[test]
    fn test_minimum_outside_interval_returns_nearest_bound() {
        let minimizer = BrentMinimizer::with_defaults();

        let left = minimizer.minimize(|x: f64| x, 1.0, 3.0).unwrap();
        assert!(left.x >= 1.0);
        assert!(left.x - 1.0 < 1e-6);

        let right = minimizer.minimize(|x: f64| -x, 1.0, 3.0).unwrap();
        assert!(right.x <= 3.0);
        assert!(3.0 - right.x < 1e-6);
    }

    #[test]
    fn test_never_evaluates_outside_bounds() {
        use std::cell::Cell;

        let out_of_range = Cell::new(false);
        let f = |x: f64| {
            if !(0.01..=3.0).contains(&x) {
                out_of_range.set(true);
            }
            (x - 5.0).abs()
        };

        let result = BrentMinimizer::with_defaults().minimize(f, 0.01, 3.0).unwrap();
        assert!(!out_of_range.get());
        assert!(result.x <= 3.0);
    }

    // ==========================================================
    // Error cases
    // ==========================================================

    #[test]
    fn test_invalid_bounds() {
        let minimizer = BrentMinimizer::<f64>::with_defaults();

        let err = minimizer.minimize(|x| x * x, 3.0, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBounds { .. }));

        let err = minimizer.minimize(|x| x * x, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBounds { .. }));

        let err = minimizer.minimize(|x| x * x, f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBounds { .. }));
    }

    #[test]
    fn test_non_finite_objective() {
        let minimizer = BrentMinimizer::with_defaults();
        let err = minimizer.minimize(|_x: f64| f64::NAN, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::NonFiniteObjective { .. }));
    }

    #[test]
    fn test_evaluation_budget_exhausted() {
        let minimizer = BrentMinimizer::new(SolverConfig::new(1e-12, 3));
        let err = minimizer
            .minimize(|x: f64| (x - 1.234).powi(2), 0.0, 10.0)
            .unwrap_err();

        assert_eq!(err, SolverError::MaxIterationsExceeded { iterations: 3 });
    }
}
