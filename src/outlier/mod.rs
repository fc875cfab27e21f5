pub mod features;
pub mod isolation;
pub mod lof;
pub mod tsne;

pub use features::{FeatureTable, BASIC_FEATURES, ENHANCED_FEATURES};
pub use isolation::isolation_forest_flags;
pub use lof::lof_flags;
pub use tsne::embed_2d;

/// Flag the `contamination` fraction of points with the highest anomaly
/// scores, scikit-learn `fit_predict` style. Deterministic: ties resolve
/// by input order.
pub fn flag_top_fraction(scores: &[f64], contamination: f64) -> Vec<bool> {
    let n = scores.len();
    // small epsilon so an exact fraction like 1/n is not lost to rounding
    let n_outliers = ((contamination * n as f64 + 1e-9) as usize).min(n);
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut flags = vec![false; n];
    for &i in order.iter().take(n_outliers) {
        flags[i] = true;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_top_fraction() {
        let scores = [0.1, 0.9, 0.2, 0.8, 0.3];
        let flags = flag_top_fraction(&scores, 0.4);
        assert_eq!(flags, vec![false, true, false, true, false]);
    }

    #[test]
    fn test_zero_contamination_flags_nothing() {
        assert_eq!(flag_top_fraction(&[1.0, 2.0], 0.0), vec![false, false]);
    }
}
