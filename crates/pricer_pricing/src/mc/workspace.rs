//! Per-call buffers for Monte Carlo simulation.
//!
//! # Memory Layout
//!
//! Buffers use a step-major contiguous layout:
//! - `paths`: (n_steps + 1) × n_paths, `paths[step * n_paths + path]`,
//!   row 0 holding the initial spot
//! - `randoms`: n_paths normal draws for the step being generated
//! - `payoffs`: n_paths terminal payoff values
//!
//! A workspace is created inside one pricing call and dropped when it
//! returns. It is never shared between calls.

/// Buffers for one simulation call.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathWorkspace;
///
/// let workspace = PathWorkspace::new(1000, 252);
/// assert_eq!(workspace.paths().len(), 1000 * 253);
/// assert_eq!(workspace.terminal().len(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct PathWorkspace {
    /// Price levels ((n_steps + 1) × n_paths).
    paths: Vec<f64>,
    /// Normal draws for a single step (n_paths).
    randoms: Vec<f64>,
    /// Payoff values per path (n_paths).
    payoffs: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl PathWorkspace {
    /// Allocates zeroed buffers for `n_paths` paths of `n_steps` steps.
    pub fn new(n_paths: usize, n_steps: usize) -> Self {
        Self {
            paths: vec![0.0; n_paths * (n_steps + 1)],
            randoms: vec![0.0; n_paths],
            payoffs: vec![0.0; n_paths],
            n_paths,
            n_steps,
        }
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Full path grid, step-major.
    #[inline]
    pub fn paths(&self) -> &[f64] {
        &self.paths
    }

    /// Price levels of every path at `step` (0 = initial spot).
    ///
    /// # Panics
    ///
    /// Panics if `step > n_steps`.
    #[inline]
    pub fn step(&self, step: usize) -> &[f64] {
        let start = step * self.n_paths;
        &self.paths[start..start + self.n_paths]
    }

    /// Terminal price of every path.
    #[inline]
    pub fn terminal(&self) -> &[f64] {
        self.step(self.n_steps)
    }

    /// Payoff values.
    #[inline]
    pub fn payoffs(&self) -> &[f64] {
        &self.payoffs
    }

    /// Mutable path grid together with the per-step random buffer.
    #[inline]
    pub(crate) fn paths_mut_and_randoms(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.paths, &mut self.randoms)
    }

    /// Terminal row together with the mutable payoff buffer.
    #[inline]
    pub(crate) fn terminal_and_payoffs_mut(&mut self) -> (&[f64], &mut [f64]) {
        let start = self.n_steps * self.n_paths;
        (
            &self.paths[start..start + self.n_paths],
            &mut self.payoffs,
        )
    }
}
