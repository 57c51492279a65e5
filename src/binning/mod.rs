//! Choropleth-style classification of one-dimensional values.
//!
//! - `KMeansBinner` / `kmeans_1d`: bin edges placed halfway between sorted
//!   k-means centroids, topped by the largest input value
//! - `BinnerConfig`: serde-loadable seed and solver settings
//! - `bin_index`, `classify`, `bin_counts`: assign values to the bins
//!
//! # Examples
//!
//! ```rust
//! use kbins::{classify, KMeansBinner};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 100.0];
//! let edges = KMeansBinner::new().bin_edges(&values, 2).unwrap();
//! assert_eq!(edges[1], 100.0);
//!
//! let bins = classify(&values, edges.as_slice().unwrap()).unwrap();
//! assert_eq!(bins, vec![0, 0, 0, 0, 0, 0, 1]);
//! ```

mod classification;
mod config;
mod kmeans_bins;

pub use classification::{bin_counts, bin_index, classify};
pub use config::BinnerConfig;
pub use kmeans_bins::{kmeans_1d, KMeansBinner, DEFAULT_SEED};
