//! Error types shared by the solver, the binner and the classification helpers.

use thiserror::Error;

/// Result alias for `kbins`.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error. Every failure is either a caller mistake caught before any
/// clustering work, or a clustering failure reported by the solver path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("clustering failed: {0}")]
    Clustering(#[from] ClusteringError),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    pub fn is_clustering(&self) -> bool {
        matches!(self, Error::Clustering(_))
    }
}

/// Structurally invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("value sequence is empty")]
    EmptyValues,

    #[error("n_bins must be >= 1, got 0")]
    ZeroBins,

    /// NaN or ±inf at `index`.
    #[error("value at index {index} is not finite ({value})")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("edge sequence is empty")]
    EmptyEdges,

    #[error("expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },
}

/// The solver could not produce the requested number of clusters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusteringError {
    #[error("cannot form {requested} bins from {distinct} distinct values")]
    InsufficientDistinctValues { requested: usize, distinct: usize },

    #[error("n_samples={n_samples} should be >= n_clusters={requested}")]
    TooFewSamples { requested: usize, n_samples: usize },

    #[error("solver returned {found} centroids, expected {expected}")]
    WrongCentroidCount { expected: usize, found: usize },

    #[error("solver returned {distinct} distinct centroids, expected {requested}")]
    DegenerateCentroids { requested: usize, distinct: usize },

    #[error("solver returned a non-finite centroid ({value})")]
    NonFiniteCentroid { value: f64 },

    #[error("KMeans not fitted. Call fit() first.")]
    NotFitted,
}

impl InvalidArgument {
    pub(crate) fn parameter(name: &'static str, message: impl Into<String>) -> Self {
        InvalidArgument::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_mark_lifts_both_kinds() {
        fn invalid() -> Result<()> {
            Err(InvalidArgument::ZeroBins)?
        }
        fn clustering() -> Result<()> {
            Err(ClusteringError::NotFitted)?
        }

        assert!(invalid().unwrap_err().is_invalid_argument());
        assert!(clustering().unwrap_err().is_clustering());
    }

    #[test]
    fn test_display_names_the_problem() {
        let err = Error::from(ClusteringError::InsufficientDistinctValues {
            requested: 3,
            distinct: 1,
        });
        assert_eq!(
            err.to_string(),
            "clustering failed: cannot form 3 bins from 1 distinct values"
        );

        let err = Error::from(InvalidArgument::parameter("n_init", "must be >= 1"));
        assert_eq!(
            err.to_string(),
            "invalid argument: invalid parameter 'n_init': must be >= 1"
        );
    }
}
