//! Local Outlier Factor.
//!
//! No registry crate provides LOF, so the classic k-distance /
//! reachability / local-reachability-density formulation is implemented
//! directly. Scores near 1 mean inlier; the `contamination` fraction with
//! the largest scores is flagged.

use anyhow::{bail, Result};
use ndarray::Array2;

use super::flag_top_fraction;

/// LOF scores for every row of `data` at the given neighbor count.
pub fn lof_scores(data: &Array2<f64>, n_neighbors: usize) -> Result<Vec<f64>> {
    let n = data.nrows();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n_neighbors == 0 {
        bail!("LOF needs at least one neighbor");
    }
    // sklearn clamps n_neighbors to n - 1 as well
    let k = n_neighbors.min(n.saturating_sub(1)).max(1);

    // Dense pairwise distances; the curation tables are small.
    let mut dist = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(data, i, j);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    // k nearest neighbors of each point (self excluded) and its k-distance
    let mut neighbors: Vec<Vec<usize>> = Vec::with_capacity(n);
    let mut k_distance = vec![0.0f64; n];
    for i in 0..n {
        let mut order: Vec<usize> = (0..n).filter(|&j| j != i).collect();
        order.sort_by(|&a, &b| {
            dist[i][a]
                .partial_cmp(&dist[i][b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(k);
        k_distance[i] = order.last().map(|&j| dist[i][j]).unwrap_or(0.0);
        neighbors.push(order);
    }

    // local reachability density; duplicate-heavy neighborhoods give a
    // zero reachability sum, treated as an infinitely dense region
    let mut lrd = vec![0.0f64; n];
    for i in 0..n {
        let reach_sum: f64 = neighbors[i]
            .iter()
            .map(|&j| dist[i][j].max(k_distance[j]))
            .sum();
        lrd[i] = if reach_sum > 0.0 {
            neighbors[i].len() as f64 / reach_sum
        } else {
            f64::INFINITY
        };
    }

    let scores = (0..n)
        .map(|i| {
            if neighbors[i].is_empty() {
                return 1.0;
            }
            let ratio_sum: f64 = neighbors[i]
                .iter()
                .map(|&j| {
                    if lrd[i].is_infinite() {
                        1.0
                    } else if lrd[j].is_infinite() {
                        f64::INFINITY
                    } else {
                        lrd[j] / lrd[i]
                    }
                })
                .sum();
            if ratio_sum.is_infinite() {
                f64::MAX
            } else {
                ratio_sum / neighbors[i].len() as f64
            }
        })
        .collect();
    Ok(scores)
}

/// `fit_predict`-style flags: the `contamination` fraction with the
/// largest LOF scores is marked as outlier.
pub fn lof_flags(data: &Array2<f64>, n_neighbors: usize, contamination: f64) -> Result<Vec<bool>> {
    let scores = lof_scores(data, n_neighbors)?;
    Ok(flag_top_fraction(&scores, contamination))
}

fn euclidean(data: &Array2<f64>, i: usize, j: usize) -> f64 {
    (0..data.ncols())
        .map(|c| {
            let d = data[[i, c]] - data[[j, c]];
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[[f64; 2]]) -> Array2<f64> {
        let flat: Vec<f64> = rows.iter().flatten().cloned().collect();
        Array2::from_shape_vec((rows.len(), 2), flat).unwrap()
    }

    #[test]
    fn test_isolated_point_scores_highest() {
        let data = matrix(&[
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [0.1, 0.1],
            [5.0, 5.0],
        ]);
        let scores = lof_scores(&data, 3).unwrap();
        let max_idx = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(max_idx, 4);
        assert!(scores[4] > 1.5);
    }

    #[test]
    fn test_flags_respect_contamination() {
        let data = matrix(&[
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [0.1, 0.1],
            [5.0, 5.0],
        ]);
        let flags = lof_flags(&data, 3, 0.2).unwrap();
        assert_eq!(flags, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_duplicates_do_not_panic() {
        let data = matrix(&[[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [4.0, 4.0]]);
        let scores = lof_scores(&data, 2).unwrap();
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_zero_neighbors_rejected() {
        let data = matrix(&[[0.0, 0.0]]);
        assert!(lof_scores(&data, 0).is_err());
    }
}
