use serde::{Deserialize, Serialize};

use super::kmeans_bins::DEFAULT_SEED;
use crate::cluster::KMeansSolver;
use crate::error::{InvalidArgument, Result};

/// Settings for a [`KMeansBinner`](super::KMeansBinner) backed by [`KMeansSolver`].
///
/// Missing fields deserialize to their defaults, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinnerConfig {
    /// Seed handed to the solver on every call.
    pub seed: u64,
    /// Lloyd iterations per restart.
    pub max_iter: usize,
    /// Convergence threshold, relative to the variance of the input.
    pub tolerance: f64,
    /// k-means++ restarts per call.
    pub n_init: usize,
}

impl Default for BinnerConfig {
    fn default() -> Self {
        let solver = KMeansSolver::default();
        Self {
            seed: DEFAULT_SEED,
            max_iter: solver.max_iter,
            tolerance: solver.tolerance,
            n_init: solver.n_init,
        }
    }
}

impl BinnerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(InvalidArgument::parameter("max_iter", "must be >= 1").into());
        }
        if self.n_init == 0 {
            return Err(InvalidArgument::parameter("n_init", "must be >= 1").into());
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(InvalidArgument::parameter(
                "tolerance",
                format!("must be finite and >= 0, got {}", self.tolerance),
            )
            .into());
        }
        Ok(())
    }

    pub fn solver(&self) -> KMeansSolver {
        KMeansSolver {
            max_iter: self.max_iter,
            tolerance: self.tolerance,
            n_init: self.n_init,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BinnerConfig::default();
        assert_eq!(config.seed, 5);
        assert_eq!(config.max_iter, 300);
        assert_eq!(config.n_init, 10);
        assert_eq!(config.tolerance, 1e-4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: BinnerConfig = serde_json::from_str(r#"{"seed": 17, "n_init": 3}"#).unwrap();
        assert_eq!(config.seed, 17);
        assert_eq!(config.n_init, 3);
        assert_eq!(config.max_iter, 300);

        let empty: BinnerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, BinnerConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_knobs() {
        let zero_init = BinnerConfig {
            n_init: 0,
            ..BinnerConfig::default()
        };
        assert!(zero_init.validate().unwrap_err().is_invalid_argument());

        let zero_iter = BinnerConfig {
            max_iter: 0,
            ..BinnerConfig::default()
        };
        assert!(zero_iter.validate().is_err());

        let negative_tol = BinnerConfig {
            tolerance: -1.0,
            ..BinnerConfig::default()
        };
        assert!(negative_tol.validate().is_err());
    }
}
