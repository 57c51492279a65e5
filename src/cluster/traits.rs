//! The clustering capability the binner is written against.

use crate::error::Result;
use crate::{Matrix, Vector};

/// Partitions points into `k` groups and reports one centroid per group.
///
/// Implementations must be deterministic for a fixed `seed`: the same
/// `(points, k, seed)` always yields the same centroids, on every host.
pub trait ClusterSolver {
    /// Fit `k` clusters to the rows of `points` and return their centroids.
    ///
    /// `points` is an `n x 1` matrix when called from the binner. The returned
    /// vector holds exactly `k` values in no particular order.
    fn fit_centroids(&self, points: &Matrix, k: usize, seed: u64) -> Result<Vector>;
}
