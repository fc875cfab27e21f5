//! Isolation Forest anomaly flags, delegated to `extended-isolation-forest`.

use anyhow::{anyhow, Result};
use extended_isolation_forest::{Forest, ForestOptions};
use ndarray::Array2;

use super::flag_top_fraction;

const N_TREES: usize = 100;
const MAX_SAMPLE_SIZE: usize = 256;

/// Fit a forest on `data` (rows = observations) and flag the
/// `contamination` fraction with the highest anomaly scores.
/// `N` must equal the number of columns.
pub fn isolation_forest_flags<const N: usize>(
    data: &Array2<f64>,
    contamination: f64,
) -> Result<Vec<bool>> {
    let rows = data.nrows();
    if rows == 0 {
        return Ok(Vec::new());
    }
    if data.ncols() != N {
        return Err(anyhow!(
            "feature matrix has {} columns, expected {}",
            data.ncols(),
            N
        ));
    }

    let samples: Vec<[f64; N]> = (0..rows)
        .map(|i| {
            let mut row = [0.0; N];
            for (j, v) in row.iter_mut().enumerate() {
                *v = data[[i, j]];
            }
            row
        })
        .collect();

    let options = ForestOptions {
        n_trees: N_TREES,
        sample_size: MAX_SAMPLE_SIZE.min(rows),
        max_tree_depth: None,
        extension_level: 1,
    };
    let forest: Forest<f64, N> = Forest::from_slice(&samples, &options)
        .map_err(|e| anyhow!("failed to fit isolation forest: {:?}", e))?;

    let scores: Vec<f64> = samples.iter().map(|s| forest.score(s)).collect();
    Ok(flag_top_fraction(&scores, contamination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_flags_obvious_outlier() {
        // tight cluster plus one far point
        let mut rows: Vec<[f64; 3]> = (0..40)
            .map(|i| {
                let jitter = (i % 5) as f64 * 0.01;
                [1.0 + jitter, 2.0 - jitter, 3.0 + jitter]
            })
            .collect();
        rows.push([50.0, -40.0, 90.0]);

        let flat: Vec<f64> = rows.iter().flatten().cloned().collect();
        let data = Array2::from_shape_vec((rows.len(), 3), flat).unwrap();

        let flags = isolation_forest_flags::<3>(&data, 1.0 / rows.len() as f64).unwrap();
        assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
        assert!(flags[rows.len() - 1], "the far point must be the one flagged");
    }

    #[test]
    fn test_column_mismatch() {
        let data = Array2::<f64>::zeros((4, 3));
        assert!(isolation_forest_flags::<5>(&data, 0.2).is_err());
    }

    #[test]
    fn test_empty_input() {
        let data = Array2::<f64>::zeros((0, 3));
        assert!(isolation_forest_flags::<3>(&data, 0.2).unwrap().is_empty());
    }
}
