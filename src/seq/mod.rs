pub mod align;
pub mod consensus;

pub use align::{normalized_global_score, pick_representative, PairwiseScorer};
pub use consensus::{majority_consensus, trim_by_gap_fraction};

/// Fraction of G/C bases over the full sequence length, case-insensitive.
/// Returns 0 for an empty sequence.
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .bytes()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();
    gc as f64 / seq.len() as f64
}

/// Shannon entropy (bits) over symbol frequencies.
pub fn shannon_entropy(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let mut counts = std::collections::HashMap::new();
    for b in seq.bytes() {
        *counts.entry(b).or_insert(0usize) += 1;
    }
    let n = seq.len() as f64;
    -counts
        .values()
        .map(|&c| {
            let p = c as f64 / n;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Ambiguity ('N') profile of a consensus sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguityReport {
    pub seq_length: usize,
    pub n_count: usize,
    pub n_proportion: f64,
    /// 1-based positions of each N.
    pub positions: Vec<usize>,
    /// Runs of Ns whose successive positions lie within the cluster
    /// threshold; singletons are not reported as clusters.
    pub clusters: Vec<Vec<usize>>,
}

pub fn analyze_ambiguity(seq: &str, cluster_threshold: usize) -> AmbiguityReport {
    let positions: Vec<usize> = seq
        .bytes()
        .enumerate()
        .filter(|(_, b)| b.to_ascii_uppercase() == b'N')
        .map(|(i, _)| i + 1)
        .collect();

    let mut clusters = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for &pos in &positions {
        match current.last() {
            Some(&prev) if pos - prev <= cluster_threshold => current.push(pos),
            Some(_) => {
                if current.len() > 1 {
                    clusters.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                current.push(pos);
            }
            None => current.push(pos),
        }
    }
    if current.len() > 1 {
        clusters.push(current);
    }

    let n_count = positions.len();
    AmbiguityReport {
        seq_length: seq.len(),
        n_count,
        n_proportion: if seq.is_empty() {
            0.0
        } else {
            n_count as f64 / seq.len() as f64
        },
        positions,
        clusters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gc_content_extremes() {
        assert_eq!(gc_content("GGCC"), 1.0);
        assert_eq!(gc_content("AATT"), 0.0);
        assert_eq!(gc_content("gcat"), 0.5);
        assert_eq!(gc_content(""), 0.0);
    }

    #[test]
    fn test_entropy_uniform() {
        assert_eq!(shannon_entropy("AAAA"), 0.0);
        let e = shannon_entropy("ACGT");
        assert!((e - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ambiguity_clusters() {
        let report = analyze_ambiguity("ANNAAAAAANAANA", 5);
        assert_eq!(report.n_count, 4);
        assert_eq!(report.positions, vec![2, 3, 10, 13]);
        // 2,3 cluster together; 10 and 13 are within 5 of each other
        assert_eq!(report.clusters, vec![vec![2, 3], vec![10, 13]]);
    }

    #[test]
    fn test_ambiguity_no_ns() {
        let report = analyze_ambiguity("ACGT", 5);
        assert_eq!(report.n_count, 0);
        assert!(report.clusters.is_empty());
        assert_eq!(report.n_proportion, 0.0);
    }
}
