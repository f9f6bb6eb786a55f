//! Solver configuration types.

use num_traits::Float;

/// Configuration for the bounded scalar minimiser.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance <= 1e-8);
/// assert_eq!(config.max_iterations, 500);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Absolute tolerance on the abscissa.
    ///
    /// The minimiser stops once the bracket around the best point is
    /// narrower than roughly `2 * (sqrt(eps) * |x| + tolerance / 3)`.
    pub tolerance: T,

    /// Maximum number of objective evaluations before giving up.
    ///
    /// Exhausting this budget yields `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-8
    /// - `max_iterations`: 500
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-8).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Config with the given tolerance and evaluation budget. Unchecked.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-8).abs() < 1e-20);
        assert_eq!(config.max_iterations, 500);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert!((config.tolerance - 1e-12).abs() < 1e-17);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    fn test_config_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance > 0.0);
    }
}
