//! Clustering used to place bin boundaries.
//!
//! This module provides:
//! - `ClusterSolver`: the capability the binner consumes ("cluster these 1-D
//!   points into k groups, deterministically for a seed")
//! - `KMeans`: Lloyd's algorithm with k-means++ seeding and restarts
//! - `KMeansSolver`: a `ClusterSolver` that runs a fresh `KMeans` per call
//!
//! # Examples
//!
//! ## K-Means Clustering
//! ```rust
//! use kbins::KMeans;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.5, 2.0],
//!     [3.0, 4.0],
//!     [5.0, 7.0],
//!     [3.5, 5.0],
//!     [4.5, 5.0]
//! ];
//!
//! let mut kmeans = KMeans::new(2).max_iter(100).random_state(5);
//! let labels = kmeans.fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), 6);
//!
//! let inertia = kmeans.inertia.unwrap();
//! println!("Inertia: {:.4}", inertia);
//! ```
//!
//! ## As a solver
//! ```rust
//! use kbins::{ClusterSolver, KMeansSolver};
//! use ndarray::array;
//!
//! let points = array![[1.0], [1.2], [9.0], [9.5]];
//! let centroids = KMeansSolver::default().fit_centroids(&points, 2, 5).unwrap();
//! assert_eq!(centroids.len(), 2);
//! ```

mod kmeans;
mod traits;

pub use kmeans::{KMeans, KMeansSolver};
pub use traits::ClusterSolver;
