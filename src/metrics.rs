use ndarray::ArrayView1;

use crate::binning::classify;
use crate::error::{InvalidArgument, Result};

/// Sum of squared deviations of each value from the mean of its bin (SDCM).
pub fn within_bin_sum_of_squares(values: &[f64], edges: &[f64]) -> Result<f64> {
    let labels = classify(values, edges)?;

    let mut sums = vec![0.0; edges.len()];
    let mut counts = vec![0usize; edges.len()];
    for (&value, &bin) in values.iter().zip(&labels) {
        sums[bin] += value;
        counts[bin] += 1;
    }

    let sdcm = values
        .iter()
        .zip(&labels)
        .map(|(&value, &bin)| {
            let mean = sums[bin] / counts[bin] as f64;
            (value - mean) * (value - mean)
        })
        .sum();
    Ok(sdcm)
}

/// Goodness of variance fit, `1 - SDCM / SDAM`.
///
/// 1.0 means every bin is internally uniform. Inputs with zero variance score
/// 1.0 by convention.
pub fn goodness_of_variance_fit(values: &[f64], edges: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(InvalidArgument::EmptyValues.into());
    }
    let sdcm = within_bin_sum_of_squares(values, edges)?;

    let x = ArrayView1::from(values);
    let mean = x.sum() / x.len() as f64;
    let sdam = x.mapv(|v| (v - mean) * (v - mean)).sum();

    if sdam == 0.0 {
        return Ok(1.0);
    }
    Ok(1.0 - sdcm / sdam)
}
