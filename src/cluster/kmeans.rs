use super::traits::ClusterSolver;
use crate::error::{ClusteringError, InvalidArgument, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

const DEFAULT_MAX_ITER: usize = 300;
const DEFAULT_TOLERANCE: f64 = 1e-4;
const DEFAULT_N_INIT: usize = 10;

/// Above this magnitude squared distances can overflow to `inf`.
const OVERFLOW_GUARD: f64 = 1e150;

#[derive(Clone, Debug)]
pub struct KMeans {
    pub cluster_centers: Option<Matrix>,
    pub labels: Option<Vec<usize>>,
    pub inertia: Option<f64>,
    pub n_iter: Option<usize>,
    n_clusters: usize,
    max_iter: usize,
    tolerance: f64,
    n_init: usize,
    random_state: Option<u64>,
}

/// Outcome of one seeded Lloyd run.
struct LloydRun {
    centers: Matrix,
    labels: Vec<usize>,
    inertia: f64,
    n_iter: usize,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            cluster_centers: None,
            labels: None,
            inertia: None,
            n_iter: None,
            n_clusters,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            n_init: DEFAULT_N_INIT,
            random_state: None,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Convergence threshold on the total squared centroid shift, relative to
    /// the mean per-feature variance of the training data.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Number of k-means++ restarts; the lowest-inertia run is kept.
    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        self.validate(x)?;

        // Without a seed every fit draws a fresh one.
        let seed = self.random_state.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Power-of-two rescaling is exact, so centers map back without rounding.
        let scale = overflow_scale(x);
        let scaled;
        let x_fit = if scale == 1.0 {
            x
        } else {
            debug!(scale, "rescaling large-magnitude input");
            scaled = x.mapv(|v| v * scale);
            &scaled
        };

        let variance = x_fit.var_axis(Axis(0), 0.0).mean().unwrap_or(0.0);
        let tol = self.tolerance * variance;

        let mut best: Option<LloydRun> = None;
        for run_idx in 0..self.n_init {
            let run = self.lloyd(x_fit, tol, &mut rng);
            debug!(
                run = run_idx,
                n_iter = run.n_iter,
                inertia = run.inertia,
                "k-means run finished"
            );
            if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let best = best.ok_or(ClusteringError::NotFitted)?;
        self.cluster_centers = Some(best.centers.mapv(|v| v / scale));
        self.labels = Some(best.labels);
        // May be `inf` for rescaled input; the clustering itself is unaffected.
        self.inertia = Some(best.inertia / scale / scale);
        self.n_iter = Some(best.n_iter);

        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        let centroids = self.fitted_centers(x)?;

        let mut labels = vec![0; x.nrows()];
        assign(x, centroids, &mut labels);
        Ok(labels)
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Vec<usize>> {
        self.fit(x)?;
        Ok(self.labels.clone().ok_or(ClusteringError::NotFitted)?)
    }

    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let centroids = self.fitted_centers(x)?;

        let mut distances = Matrix::zeros((x.nrows(), self.n_clusters));
        for i in 0..x.nrows() {
            for k in 0..self.n_clusters {
                distances[[i, k]] = squared_distance(&x.row(i), &centroids.row(k)).sqrt();
            }
        }

        Ok(distances)
    }

    fn validate(&self, x: &Matrix) -> Result<()> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(InvalidArgument::EmptyValues.into());
        }
        if self.n_clusters == 0 {
            return Err(InvalidArgument::parameter("n_clusters", "must be >= 1").into());
        }
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
        if let Some((i, value)) = x
            .rows()
            .into_iter()
            .enumerate()
            .find_map(|(i, row)| row.iter().find(|v| !v.is_finite()).map(|&v| (i, v)))
        {
            return Err(InvalidArgument::NonFiniteValue { index: i, value }.into());
        }
        if x.nrows() < self.n_clusters {
            return Err(ClusteringError::TooFewSamples {
                requested: self.n_clusters,
                n_samples: x.nrows(),
            }
            .into());
        }
        Ok(())
    }

    fn fitted_centers<'a>(&'a self, x: &Matrix) -> Result<&'a Matrix> {
        let centroids = self
            .cluster_centers
            .as_ref()
            .ok_or(ClusteringError::NotFitted)?;

        if x.ncols() != centroids.ncols() {
            return Err(InvalidArgument::DimensionMismatch {
                expected: centroids.ncols(),
                found: x.ncols(),
            }
            .into());
        }
        Ok(centroids)
    }

    fn lloyd(&self, x: &Matrix, tol: f64, rng: &mut impl Rng) -> LloydRun {
        let mut centers = self.initialize_centroids(x, rng);
        let mut labels = vec![0; x.nrows()];
        let mut n_iter = 0;

        for iteration in 0..self.max_iter {
            n_iter = iteration + 1;
            assign(x, &centers, &mut labels);
            let new_centers = self.update_centroids(x, &centers, &labels);

            let shift: f64 = centers
                .iter()
                .zip(new_centers.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            centers = new_centers;

            trace!(iteration, shift, "lloyd step");
            if shift <= tol {
                break;
            }
        }

        // Labels must describe the centers that are returned.
        let inertia = assign(x, &centers, &mut labels);
        LloydRun {
            centers,
            labels,
            inertia,
            n_iter,
        }
    }

    /// k-means++ seeding: each new center is drawn with probability
    /// proportional to its squared distance from the closest chosen center.
    fn initialize_centroids(&self, x: &Matrix, rng: &mut impl Rng) -> Matrix {
        let n = x.nrows();
        let mut centroids = Matrix::zeros((self.n_clusters, x.ncols()));

        let first_idx = rng.gen_range(0..n);
        centroids.row_mut(0).assign(&x.row(first_idx));

        for k in 1..self.n_clusters {
            let distances: Vec<f64> = (0..n)
                .map(|i| {
                    (0..k)
                        .map(|j| squared_distance(&x.row(i), &centroids.row(j)))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();

            // WeightedIndex panics on a non-finite total and errors on a zero one
            // (every point already coincides with a center).
            let total: f64 = distances.iter().sum();
            let weighted = if total.is_finite() {
                WeightedIndex::new(&distances).ok()
            } else {
                None
            };
            let idx = match weighted {
                Some(dist) => dist.sample(rng),
                None => rng.gen_range(0..n),
            };
            centroids.row_mut(k).assign(&x.row(idx));
        }

        centroids
    }

    fn update_centroids(&self, x: &Matrix, centers: &Matrix, labels: &[usize]) -> Matrix {
        let mut new_centers = Matrix::zeros(centers.raw_dim());
        let mut counts = vec![0usize; self.n_clusters];

        for (i, &k) in labels.iter().enumerate() {
            let mut row = new_centers.row_mut(k);
            row += &x.row(i);
            counts[k] += 1;
        }

        let empty: Vec<usize> = (0..self.n_clusters).filter(|&k| counts[k] == 0).collect();
        for (k, &count) in counts.iter().enumerate() {
            if count > 0 {
                new_centers.row_mut(k).mapv_inplace(|v| v / count as f64);
            }
        }

        if !empty.is_empty() {
            // Re-seed empty clusters with the points worst served by their center.
            let mut far: Vec<(usize, f64)> = labels
                .iter()
                .enumerate()
                .map(|(i, &k)| (i, squared_distance(&x.row(i), &centers.row(k))))
                .collect();
            far.sort_by(|a, b| b.1.total_cmp(&a.1));

            for (&k, &(idx, _)) in empty.iter().zip(far.iter()) {
                warn!(cluster = k, point = idx, "empty cluster re-seeded");
                new_centers.row_mut(k).assign(&x.row(idx));
            }
        }

        new_centers
    }
}

/// Assign each row to its nearest center, returning the resulting inertia.
fn assign(x: &Matrix, centers: &Matrix, labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (i, label) in labels.iter_mut().enumerate() {
        let point = x.row(i);
        let mut min_distance = f64::INFINITY;
        let mut closest_cluster = 0;

        for k in 0..centers.nrows() {
            let distance = squared_distance(&point, &centers.row(k));
            if distance < min_distance {
                min_distance = distance;
                closest_cluster = k;
            }
        }

        *label = closest_cluster;
        inertia += min_distance;
    }
    inertia
}

/// Power of two that brings the largest magnitude in `x` to at most 1, or 1.0
/// when no rescaling is needed.
fn overflow_scale(x: &Matrix) -> f64 {
    let max_abs = x.fold(0.0f64, |m, v| m.max(v.abs()));
    if max_abs <= OVERFLOW_GUARD {
        return 1.0;
    }
    (-max_abs.log2().ceil()).exp2()
}

fn squared_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// [`ClusterSolver`] backed by a fresh [`KMeans`] per call.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansSolver {
    pub max_iter: usize,
    pub tolerance: f64,
    pub n_init: usize,
}

impl Default for KMeansSolver {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            n_init: DEFAULT_N_INIT,
        }
    }
}

impl ClusterSolver for KMeansSolver {
    fn fit_centroids(&self, points: &Matrix, k: usize, seed: u64) -> Result<Vector> {
        if points.ncols() != 1 {
            return Err(InvalidArgument::DimensionMismatch {
                expected: 1,
                found: points.ncols(),
            }
            .into());
        }

        let mut kmeans = KMeans::new(k)
            .max_iter(self.max_iter)
            .tolerance(self.tolerance)
            .n_init(self.n_init)
            .random_state(seed);
        kmeans.fit(points)?;

        let centers = kmeans
            .cluster_centers
            .ok_or(ClusteringError::NotFitted)?;
        Ok(centers.column(0).to_owned())
    }
}
