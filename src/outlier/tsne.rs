//! 2-D t-SNE embedding of a feature matrix, delegated to `bhtsne`.

use anyhow::{bail, Result};
use ndarray::Array2;

const THETA: f32 = 0.5;
const EPOCHS: usize = 1000;

/// Embed the rows of `data` into 2-D with Barnes-Hut t-SNE. Perplexity is
/// clamped to what the sample count allows; fewer than 5 rows cannot be
/// embedded meaningfully.
pub fn embed_2d(data: &Array2<f64>, perplexity: f32) -> Result<Vec<(f64, f64)>> {
    let n = data.nrows();
    if n < 5 {
        bail!("t-SNE needs at least 5 samples, got {}", n);
    }

    let samples: Vec<Vec<f32>> = (0..n)
        .map(|i| (0..data.ncols()).map(|j| data[[i, j]] as f32).collect())
        .collect();

    // bhtsne requires n - 1 >= 3 * perplexity
    let max_perplexity = ((n - 1) as f32 / 3.0 - 1.0).max(1.0);
    let perplexity = perplexity.min(max_perplexity);

    let mut tsne = bhtsne::tSNE::new(&samples);
    let embedding: Vec<f32> = tsne
        .embedding_dim(2)
        .perplexity(perplexity)
        .epochs(EPOCHS)
        .barnes_hut(THETA, |a, b| {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f32>()
                .sqrt()
        })
        .embedding();

    Ok(embedding
        .chunks(2)
        .map(|xy| (xy[0] as f64, xy[1] as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_has_one_point_per_row() {
        let mut rows = Vec::new();
        for i in 0..20 {
            let v = i as f64;
            rows.extend_from_slice(&[v, v * 0.5, 40.0 - v]);
        }
        let data = Array2::from_shape_vec((20, 3), rows).unwrap();
        let embedding = embed_2d(&data, 10.0).unwrap();
        assert_eq!(embedding.len(), 20);
        assert!(embedding.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_too_few_samples() {
        let data = Array2::<f64>::zeros((3, 3));
        assert!(embed_2d(&data, 30.0).is_err());
    }
}
