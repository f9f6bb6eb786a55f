//! Greek sensitivity grids over spot and volatility.
//!
//! A grid evaluates one Greek at every (volatility, spot) pair while the
//! strike, expiry and rate of a base contract stay fixed. Rows are
//! volatilities in ascending order and columns are spots in ascending
//! order, so `values[i][j]` is the Greek at `vols[i]` and `spots[j]`.
//!
//! Cells are independent and are evaluated in parallel with Rayon.

use pricer_core::types::{OptionParams, OptionType, PricingError};
use pricer_models::analytical::{greek, Greek};
use tracing::debug;

use crate::parallel::{try_parallel_map, ParallelConfig};

/// Greeks rendered by [`SensitivityGrid::generate_all`], in panel order.
pub const PANEL_GREEKS: [Greek; 4] = [Greek::Delta, Greek::Gamma, Greek::Vega, Greek::Theta];

/// Evenly spaced points from `start` to `end`, both included.
///
/// `n == 1` yields `[start]` and `n == 0` yields an empty vector.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::sensitivity::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}

/// Shape of a sensitivity grid.
///
/// Spot bounds are multiples of the base spot; volatility bounds are
/// absolute.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSpec {
    /// Lowest spot as a multiple of the base spot.
    pub spot_low: f64,
    /// Highest spot as a multiple of the base spot.
    pub spot_high: f64,
    /// Number of spot columns.
    pub spot_points: usize,
    /// Lowest volatility.
    pub vol_min: f64,
    /// Highest volatility.
    pub vol_max: f64,
    /// Number of volatility rows.
    pub vol_points: usize,
}

impl Default for GridSpec {
    /// 20 spots over 70%..130% of base, 20 volatilities over 5%..80%.
    fn default() -> Self {
        Self {
            spot_low: 0.7,
            spot_high: 1.3,
            spot_points: 20,
            vol_min: 0.05,
            vol_max: 0.8,
            vol_points: 20,
        }
    }
}

impl GridSpec {
    /// Validates the grid shape.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if either axis has fewer than two
    /// points, a bound is not strictly positive and finite, or a range is
    /// inverted or empty.
    pub fn validate(&self) -> Result<(), PricingError> {
        check_axis(
            "spot_low",
            "spot_high",
            "spot_points",
            self.spot_low,
            self.spot_high,
            self.spot_points,
        )?;
        check_axis(
            "vol_min",
            "vol_max",
            "vol_points",
            self.vol_min,
            self.vol_max,
            self.vol_points,
        )
    }

    /// Spot axis for a base spot.
    pub fn spots(&self, base_spot: f64) -> Vec<f64> {
        linspace(
            base_spot * self.spot_low,
            base_spot * self.spot_high,
            self.spot_points,
        )
    }

    /// Volatility axis.
    pub fn vols(&self) -> Vec<f64> {
        linspace(self.vol_min, self.vol_max, self.vol_points)
    }
}

fn check_axis(
    low_name: &'static str,
    high_name: &'static str,
    points_name: &'static str,
    low: f64,
    high: f64,
    points: usize,
) -> Result<(), PricingError> {
    if points < 2 {
        return Err(PricingError::invalid_parameter(
            points_name,
            points as f64,
            "must be at least 2",
        ));
    }
    for (name, value) in [(low_name, low), (high_name, high)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(PricingError::invalid_parameter(
                name,
                value,
                "must be positive and finite",
            ));
        }
    }
    if high <= low {
        return Err(PricingError::invalid_parameter(
            high_name,
            high,
            "must exceed the lower bound",
        ));
    }
    Ok(())
}

/// One Greek evaluated over a volatility × spot grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityGrid {
    /// The Greek in every cell.
    pub greek: Greek,
    /// Call or put.
    pub option_type: OptionType,
    /// Column axis.
    pub spots: Vec<f64>,
    /// Row axis.
    pub vols: Vec<f64>,
    /// `values[row][column]`, one row per volatility.
    pub values: Vec<Vec<f64>>,
}

impl SensitivityGrid {
    /// Evaluates `greek` over the grid described by `layout`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `layout` or `base` is invalid
    /// - Any error from the Greeks engine for an individual cell
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_core::types::{OptionParams, OptionType};
    /// use pricer_models::analytical::Greek;
    /// use pricer_risk::sensitivity::{GridSpec, SensitivityGrid};
    ///
    /// let base = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
    /// let grid = SensitivityGrid::generate(&base, OptionType::Call, Greek::Delta, &GridSpec::default())
    ///     .unwrap();
    ///
    /// assert_eq!(grid.values.len(), 20);
    /// assert_eq!(grid.values[0].len(), 20);
    /// assert!(grid.values.iter().flatten().all(|&d| (0.0..=1.0).contains(&d)));
    /// ```
    pub fn generate(
        base: &OptionParams,
        option_type: OptionType,
        greek: Greek,
        layout: &GridSpec,
    ) -> Result<Self, PricingError> {
        Self::generate_with(base, option_type, greek, layout, &ParallelConfig::default())
    }

    /// Same as [`generate`](Self::generate) with explicit parallel settings.
    pub fn generate_with(
        base: &OptionParams,
        option_type: OptionType,
        greek_kind: Greek,
        layout: &GridSpec,
        parallel: &ParallelConfig,
    ) -> Result<Self, PricingError> {
        base.validate()?;
        layout.validate()?;

        let spots = layout.spots(base.spot);
        let vols = layout.vols();
        let cells: Vec<(f64, f64)> = vols
            .iter()
            .flat_map(|&vol| spots.iter().map(move |&spot| (vol, spot)))
            .collect();

        debug!(
            greek = %greek_kind,
            option_type = %option_type,
            rows = vols.len(),
            columns = spots.len(),
            parallel = parallel.should_parallelize(cells.len()),
            "generating sensitivity grid"
        );

        let flat = try_parallel_map(&cells, parallel, |&(vol, spot)| {
            let params = base.with_spot(spot)?.with_volatility(vol)?;
            greek(greek_kind, &params, option_type)
        })?;

        let values = flat
            .chunks(spots.len())
            .map(<[f64]>::to_vec)
            .collect();

        Ok(Self {
            greek: greek_kind,
            option_type,
            spots,
            vols,
            values,
        })
    }

    /// Delta, gamma, vega and theta grids for the same base and layout.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_all(
        base: &OptionParams,
        option_type: OptionType,
        layout: &GridSpec,
    ) -> Result<Vec<Self>, PricingError> {
        PANEL_GREEKS
            .iter()
            .map(|&g| Self::generate(base, option_type, g, layout))
            .collect()
    }

    /// Value at row `vol_index`, column `spot_index`.
    pub fn value(&self, vol_index: usize, spot_index: usize) -> Option<f64> {
        self.values.get(vol_index)?.get(spot_index).copied()
    }

    /// Smallest and largest cell value.
    pub fn range(&self) -> (f64, f64) {
        self.values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
