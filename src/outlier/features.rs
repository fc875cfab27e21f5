//! Feature extraction for repeat-array consensus records.

use ndarray::Array2;

use crate::fileformat::UltraRecord;
use crate::seq::{self, PairwiseScorer};

pub const BASIC_FEATURES: [&str; 3] = ["gc_content", "entropy", "indel_variability"];
pub const ENHANCED_FEATURES: [&str; 5] = [
    "gc_content",
    "entropy",
    "indel_variability",
    "normalized_distance",
    "alignment_score",
];

/// Derived columns for one ULTRA record, aligned by index with the input
/// table.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub gc_content: Vec<f64>,
    pub entropy: Vec<f64>,
    pub indel_variability: Vec<f64>,
    /// Absolute distance of the array start from the centromere midpoint,
    /// when a midpoint was given.
    pub distance_from_centromere: Vec<Option<f64>>,
    /// Distance normalized by array length.
    pub normalized_distance: Vec<Option<f64>>,
    pub alignment_score: Vec<f64>,
}

impl FeatureTable {
    /// Compute all features. Alignment scores compare each consensus,
    /// tandemly extended `repeat_extend` times, against the equally
    /// extended representative.
    pub fn compute(
        records: &[UltraRecord],
        representative: &str,
        repeat_extend: usize,
        centromere_midpoint: Option<u64>,
    ) -> FeatureTable {
        let repeat_extend = repeat_extend.max(1);
        let rep = representative.repeat(repeat_extend);
        let mut scorer = PairwiseScorer::new();

        let mut table = FeatureTable {
            gc_content: Vec::with_capacity(records.len()),
            entropy: Vec::with_capacity(records.len()),
            indel_variability: Vec::with_capacity(records.len()),
            distance_from_centromere: Vec::with_capacity(records.len()),
            normalized_distance: Vec::with_capacity(records.len()),
            alignment_score: Vec::with_capacity(records.len()),
        };

        for r in records {
            table.gc_content.push(seq::gc_content(&r.consensus));
            table.entropy.push(seq::shannon_entropy(&r.consensus));
            table.indel_variability.push(r.indel_variability() as f64);

            match centromere_midpoint {
                Some(mid) => {
                    let dist = (r.start as f64 - mid as f64).abs();
                    table.distance_from_centromere.push(Some(dist));
                    table
                        .normalized_distance
                        .push(Some(dist / r.length.max(1) as f64));
                }
                None => {
                    table.distance_from_centromere.push(None);
                    table.normalized_distance.push(None);
                }
            }

            let query = r.consensus.repeat(repeat_extend);
            table.alignment_score.push(scorer.score(&rep, &query));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.gc_content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gc_content.is_empty()
    }

    /// GC, entropy and indel variability.
    pub fn basic_matrix(&self) -> Array2<f64> {
        let mut m = Array2::zeros((self.len(), 3));
        for i in 0..self.len() {
            m[[i, 0]] = self.gc_content[i];
            m[[i, 1]] = self.entropy[i];
            m[[i, 2]] = self.indel_variability[i];
        }
        m
    }

    /// Basic features plus normalized centromere distance (0 when no
    /// midpoint was configured) and alignment score.
    pub fn enhanced_matrix(&self) -> Array2<f64> {
        let mut m = Array2::zeros((self.len(), 5));
        for i in 0..self.len() {
            m[[i, 0]] = self.gc_content[i];
            m[[i, 1]] = self.entropy[i];
            m[[i, 2]] = self.indel_variability[i];
            m[[i, 3]] = self.normalized_distance[i].unwrap_or(0.0);
            m[[i, 4]] = self.alignment_score[i];
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(consensus: &str, start: u64) -> UltraRecord {
        UltraRecord {
            seq_id: "Gm15".to_string(),
            start,
            length: 200,
            period: consensus.len() as u64,
            score: 100.0,
            substitutions: 2,
            insertions: 1,
            deletions: 0,
            consensus: consensus.to_string(),
            sequence: consensus.repeat(2),
        }
    }

    #[test]
    fn test_feature_values() {
        let records = vec![record("GGCC", 1_000_000)];
        let t = FeatureTable::compute(&records, "GGCC", 1, Some(1_000_100));
        assert_eq!(t.gc_content, vec![1.0]);
        assert_eq!(t.indel_variability, vec![3.0]);
        assert_eq!(t.distance_from_centromere, vec![Some(100.0)]);
        assert_eq!(t.normalized_distance, vec![Some(0.5)]);
        assert_eq!(t.alignment_score, vec![1.0]);
    }

    #[test]
    fn test_matrix_shapes() {
        let records = vec![record("ACGT", 10), record("GGCC", 20)];
        let t = FeatureTable::compute(&records, "ACGT", 3, None);
        assert_eq!(t.basic_matrix().dim(), (2, 3));
        let enhanced = t.enhanced_matrix();
        assert_eq!(enhanced.dim(), (2, 5));
        // no midpoint: normalized distance column is zero-filled
        assert_eq!(enhanced[[0, 3]], 0.0);
        // identical consensus scores 1.0 even tandemly extended
        assert_eq!(enhanced[[0, 4]], 1.0);
    }
}
