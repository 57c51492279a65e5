//! Clustering-based bin edges for choropleth classification.
//!
//! `kmeans_1d` clusters a column of values with seeded k-means and returns
//! one upper edge per bin; `classify` then maps values onto those bins.

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod binning;
pub mod cluster;
pub mod error;
pub mod metrics;

pub use binning::{
    bin_counts, bin_index, classify, kmeans_1d, BinnerConfig, KMeansBinner, DEFAULT_SEED,
};
pub use cluster::{ClusterSolver, KMeans, KMeansSolver};
pub use error::{ClusteringError, Error, InvalidArgument, Result};
pub use metrics::{goodness_of_variance_fit, within_bin_sum_of_squares};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
