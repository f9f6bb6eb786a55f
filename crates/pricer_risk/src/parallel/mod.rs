//! Rayon-based parallelisation utilities.
//!
//! Sweeps over independent pricing inputs (grid cells, strikes, scenarios)
//! are mapped in parallel once they are large enough to amortise the
//! thread-pool overhead. Output order always matches input order.

use rayon::prelude::*;

/// Minimum number of items handed to a single Rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 16;

/// Default item count from which work runs in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum items per Rayon task
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Maps every item through a fallible function, in parallel when the
/// configuration allows it.
///
/// Results keep the input order. The first error encountered is returned;
/// with parallel execution "first" is not necessarily the lowest index.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `config` - Batch size and parallel threshold
/// * `mapper` - Function to apply to each item
pub fn try_parallel_map<T, R, E, F>(
    items: &[T],
    config: &ParallelConfig,
    mapper: F,
) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        items
            .par_iter()
            .with_min_len(config.batch_size)
            .map(mapper)
            .collect()
    } else {
        items.iter().map(mapper).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_batch_size_minimum() {
        assert_eq!(ParallelConfig::new(0, 10).batch_size, 1);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(10));
        assert!(config.should_parallelize(64));
        assert!(config.should_parallelize(1000));
        assert!(!ParallelConfig::sequential().should_parallelize(1_000_000));
    }

    #[test]
    fn test_try_parallel_map_preserves_order() {
        let items: Vec<u32> = (0..1000).collect();
        let parallel: Result<Vec<u32>, String> =
            try_parallel_map(&items, &ParallelConfig::new(8, 1), |&x| Ok(x * 2));
        let sequential: Result<Vec<u32>, String> =
            try_parallel_map(&items, &ParallelConfig::sequential(), |&x| Ok(x * 2));

        let parallel = parallel.unwrap();
        assert_eq!(parallel, sequential.unwrap());
        assert_eq!(parallel[500], 1000);
    }

    #[test]
    fn test_try_parallel_map_propagates_error() {
        let items: Vec<i32> = (0..200).collect();
        let result = try_parallel_map(&items, &ParallelConfig::default(), |&x| {
            if x == 150 {
                Err(format!("bad item {}", x))
            } else {
                Ok(x)
            }
        });
        assert_eq!(result.unwrap_err(), "bad item 150");
    }
}
