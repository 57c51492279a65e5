use std::collections::HashSet;

use ndarray::{ArrayView1, Axis};
use tracing::debug;

use super::config::BinnerConfig;
use crate::cluster::{ClusterSolver, KMeansSolver};
use crate::error::{ClusteringError, InvalidArgument, Result};
use crate::Vector;

/// Seed used when none is configured. Identical inputs give identical edges
/// across runs and hosts as long as the seed is unchanged.
pub const DEFAULT_SEED: u64 = 5;

/// Computes bin edges by clustering the values and splitting halfway between
/// neighbouring cluster centres.
///
/// Inputs with fewer distinct values than requested bins are rejected with
/// [`ClusteringError::InsufficientDistinctValues`] before the solver runs.
#[derive(Clone, Debug)]
pub struct KMeansBinner<S = KMeansSolver> {
    seed: u64,
    solver: S,
}

impl KMeansBinner {
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            solver: KMeansSolver::default(),
        }
    }

    pub fn from_config(config: &BinnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            seed: config.seed,
            solver: config.solver(),
        })
    }
}

impl Default for KMeansBinner {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ClusterSolver> KMeansBinner<S> {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_solver<T: ClusterSolver>(self, solver: T) -> KMeansBinner<T> {
        KMeansBinner {
            seed: self.seed,
            solver,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns `n_bins` non-decreasing edges; the last one is `max(values)`.
    ///
    /// Edge `i` is the upper bound of bin `i`, bins being `(edge[i-1], edge[i]]`.
    pub fn bin_edges(&self, values: &[f64], n_bins: usize) -> Result<Vector> {
        if values.is_empty() {
            return Err(InvalidArgument::EmptyValues.into());
        }
        if n_bins == 0 {
            return Err(InvalidArgument::ZeroBins.into());
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InvalidArgument::NonFiniteValue { index, value }.into());
        }

        let distinct = count_distinct(values);
        if distinct < n_bins {
            return Err(ClusteringError::InsufficientDistinctValues {
                requested: n_bins,
                distinct,
            }
            .into());
        }

        debug!(
            n_values = values.len(),
            n_bins,
            seed = self.seed,
            "computing k-means bin edges"
        );

        let points = ArrayView1::from(values).insert_axis(Axis(1)).to_owned();
        let centroids = self.solver.fit_centroids(&points, n_bins, self.seed)?;
        if centroids.len() != n_bins {
            return Err(ClusteringError::WrongCentroidCount {
                expected: n_bins,
                found: centroids.len(),
            }
            .into());
        }

        if let Some(&value) = centroids.iter().find(|c| !c.is_finite()) {
            return Err(ClusteringError::NonFiniteCentroid { value }.into());
        }

        // A cluster mean can round one ulp past the data range, e.g. three
        // copies of 0.1 average to 0.10000000000000002.
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut centers: Vec<f64> = centroids.iter().map(|c| c.clamp(min, max)).collect();
        centers.sort_by(f64::total_cmp);
        let distinct_centers = 1 + centers.windows(2).filter(|w| w[0] != w[1]).count();
        if distinct_centers < n_bins {
            return Err(ClusteringError::DegenerateCentroids {
                requested: n_bins,
                distinct: distinct_centers,
            }
            .into());
        }

        // Halve before adding so midpoints near f64::MAX stay finite.
        let mut edges: Vec<f64> = centers
            .windows(2)
            .map(|w| w[0] / 2.0 + w[1] / 2.0)
            .collect();
        edges.push(max);
        edges.sort_by(f64::total_cmp);

        debug!(?edges, "bin edges computed");
        Ok(Vector::from(edges))
    }
}

/// Bin edges for `values` using the default seed and solver.
///
/// ```rust
/// let edges = kbins::kmeans_1d(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 100.0], 2).unwrap();
/// assert_eq!(edges.to_vec(), vec![51.75, 100.0]);
/// ```
pub fn kmeans_1d(values: &[f64], n_bins: usize) -> Result<Vector> {
    KMeansBinner::new().bin_edges(values, n_bins)
}

/// Number of distinct values, with `-0.0` and `0.0` counted once.
fn count_distinct(values: &[f64]) -> usize {
    values
        .iter()
        .map(|&v| (if v == 0.0 { 0.0f64 } else { v }).to_bits())
        .collect::<HashSet<u64>>()
        .len()
}
