use crate::error::{InvalidArgument, Result};

/// Bin index for `value`: the first `i` with `value <= edges[i]`.
///
/// Values above the last edge land in the top bin, so data outside the
/// sample the edges were fitted on still classifies.
pub fn bin_index(edges: &[f64], value: f64) -> Result<usize> {
    check_edges(edges)?;
    if !value.is_finite() {
        return Err(InvalidArgument::parameter("value", format!("must be finite, got {value}")).into());
    }
    Ok(locate(edges, value))
}

pub fn classify(values: &[f64], edges: &[f64]) -> Result<Vec<usize>> {
    check_edges(edges)?;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| -> Result<usize> {
            if value.is_finite() {
                Ok(locate(edges, value))
            } else {
                Err(InvalidArgument::NonFiniteValue { index, value }.into())
            }
        })
        .collect()
}

/// Number of values falling in each bin.
pub fn bin_counts(values: &[f64], edges: &[f64]) -> Result<Vec<usize>> {
    let mut counts = vec![0; edges.len()];
    for bin in classify(values, edges)? {
        counts[bin] += 1;
    }
    Ok(counts)
}

fn locate(edges: &[f64], value: f64) -> usize {
    edges
        .partition_point(|&edge| edge < value)
        .min(edges.len() - 1)
}

fn check_edges(edges: &[f64]) -> Result<()> {
    if edges.is_empty() {
        return Err(InvalidArgument::EmptyEdges.into());
    }
    if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[0] > w[1]) {
        return Err(InvalidArgument::parameter("edges", "must be finite and non-decreasing").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_bins_are_closed_above() {
        let edges = [2.0, 5.0, 7.0];

        assert_eq!(bin_index(&edges, -10.0).unwrap(), 0);
        assert_eq!(bin_index(&edges, 2.0).unwrap(), 0);
        assert_eq!(bin_index(&edges, 2.5).unwrap(), 1);
        assert_eq!(bin_index(&edges, 5.0).unwrap(), 1);
        assert_eq!(bin_index(&edges, 7.0).unwrap(), 2);
    }

    #[test]
    fn test_above_max_clamps_to_top_bin() {
        assert_eq!(bin_index(&[2.0, 5.0, 7.0], 1e9).unwrap(), 2);
    }

    #[test]
    fn test_classify_and_count() {
        let values = [1.0, 3.0, 3.0, 7.0, 6.0];
        let edges = [2.0, 5.0, 7.0];

        assert_eq!(classify(&values, &edges).unwrap(), vec![0, 1, 1, 2, 2]);
        assert_eq!(bin_counts(&values, &edges).unwrap(), vec![1, 2, 2]);
    }

    #[test]
    fn test_repeated_edges() {
        let edges = [1.0, 1.0, 4.0];
        assert_eq!(bin_index(&edges, 1.0).unwrap(), 0);
        assert_eq!(bin_index(&edges, 1.5).unwrap(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            bin_index(&[], 1.0).unwrap_err(),
            Error::InvalidArgument(InvalidArgument::EmptyEdges)
        );
        assert!(bin_index(&[3.0, 1.0], 1.0).unwrap_err().is_invalid_argument());
        assert!(matches!(
            bin_index(&[1.0], f64::NAN).unwrap_err(),
            Error::InvalidArgument(InvalidArgument::InvalidParameter { name: "value", .. })
        ));

        let err = classify(&[1.0, f64::NEG_INFINITY], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument(InvalidArgument::NonFiniteValue { index: 1, .. })
        ));
    }
}
