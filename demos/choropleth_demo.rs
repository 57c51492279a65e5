use kbins::{bin_counts, goodness_of_variance_fit, BinnerConfig, KMeansBinner};
use ndarray::{concatenate, Array1, Axis};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== K-Means Choropleth Classification ===\n");

    // Synthetic attribute column: three income bands plus a few outliers.
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let low = Array1::random_using(120, Normal::new(18_000.0, 2_500.0)?, &mut rng);
    let mid = Array1::random_using(80, Normal::new(42_000.0, 4_000.0)?, &mut rng);
    let high = Array1::random_using(30, Normal::new(95_000.0, 8_000.0)?, &mut rng);
    let outliers = Array1::from(vec![250_000.0, 310_000.0]);
    let values = concatenate(Axis(0), &[low.view(), mid.view(), high.view(), outliers.view()])?;
    let values = values.to_vec();

    println!("Dataset: {} values", values.len());

    let binner = KMeansBinner::from_config(&BinnerConfig::default())?;
    for n_bins in 2..=6 {
        let edges = binner.bin_edges(&values, n_bins)?;
        let edges = edges.to_vec();
        let counts = bin_counts(&values, &edges)?;
        let gvf = goodness_of_variance_fit(&values, &edges)?;

        println!("\nn_bins = {n_bins} (GVF {gvf:.4})");
        let mut lower = f64::NEG_INFINITY;
        for (edge, count) in edges.iter().zip(&counts) {
            println!("  ({lower:>12.1}, {edge:>12.1}]  {count:>4} values");
            lower = *edge;
        }
    }

    Ok(())
}
