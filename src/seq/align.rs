//! Pairwise alignment scoring against a representative repeat unit.
//!
//! Scoring mirrors the curation protocol: match = 1, mismatch = 0, free
//! gaps, global mode, normalized by the longer sequence. Two identical
//! sequences score 1.0; unrelated sequences drift toward 0.

use anyhow::{bail, Result};
use bio::alignment::pairwise::Aligner;
use ndarray::{Array2, Axis};

fn unit_match(a: u8, b: u8) -> i32 {
    if a == b {
        1
    } else {
        0
    }
}

/// Reusable global aligner; construction allocates the DP matrices once.
pub struct PairwiseScorer {
    aligner: Aligner<fn(u8, u8) -> i32>,
}

impl PairwiseScorer {
    pub fn new() -> Self {
        PairwiseScorer {
            aligner: Aligner::new(0, 0, unit_match as fn(u8, u8) -> i32),
        }
    }

    /// Global alignment score normalized by the longer sequence length.
    pub fn score(&mut self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let raw = self.aligner.global(a.as_bytes(), b.as_bytes()).score;
        raw as f64 / a.len().max(b.len()) as f64
    }
}

impl Default for PairwiseScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience one-shot wrapper around [`PairwiseScorer`].
pub fn normalized_global_score(a: &str, b: &str) -> f64 {
    PairwiseScorer::new().score(a, b)
}

/// Choose the sequence with the highest mean similarity to all others.
/// Returns `(index, sequence)`.
pub fn pick_representative(seqs: &[String]) -> Result<(usize, String)> {
    if seqs.is_empty() {
        bail!("no sequences provided to choose a representative from");
    }
    if seqs.len() == 1 {
        return Ok((0, seqs[0].clone()));
    }

    let n = seqs.len();
    let mut scorer = PairwiseScorer::new();
    let mut matrix = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let s = scorer.score(&seqs[i], &seqs[j]);
            matrix[[i, j]] = s;
            matrix[[j, i]] = s;
        }
    }

    let means = matrix.mean_axis(Axis(1)).expect("n > 0");
    let (idx, _) = means
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv {
                (i, v)
            } else {
                (bi, bv)
            }
        });
    Ok((idx, seqs[idx].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_score_one() {
        assert_eq!(normalized_global_score("ACGTACGT", "ACGTACGT"), 1.0);
    }

    #[test]
    fn test_score_normalized_by_longer() {
        // "ACGT" aligns fully inside "ACGTACGT": raw score 4, max len 8
        let s = normalized_global_score("ACGT", "ACGTACGT");
        assert!((s - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sequence_scores_zero() {
        assert_eq!(normalized_global_score("", "ACGT"), 0.0);
    }

    #[test]
    fn test_representative_is_central_sequence() {
        let seqs: Vec<String> = ["ACGTACGTAA", "ACGTACGTAC", "TTTTTTTTTT"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (idx, rep) = pick_representative(&seqs).unwrap();
        assert!(idx < 2, "the divergent poly-T must not be representative");
        assert_eq!(rep, seqs[idx]);
    }

    #[test]
    fn test_representative_empty_input() {
        assert!(pick_representative(&[]).is_err());
    }
}
